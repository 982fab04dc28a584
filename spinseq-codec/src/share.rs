//! Deep-link binder for shareable sequence URLs
//!
//! Embeds a (possibly compressed) sequence payload into a link of the
//! form `<origin>/?open=<moduleAlias>:<payload>` and extracts it back
//! out. The module alias is an opaque routing token owned by the caller;
//! the only constraints are "non-empty" and "no colon", since the first
//! colon separates alias from payload.
//!
//! Percent-encoding of the payload (which contains `|` and `:`) is
//! delegated to the `url` crate on both sides.

use url::Url;

use crate::compress::{compress_sequence, decompress_sequence};
use crate::error::{CodecError, Result};
use crate::sequence::Sequence;

/// Query parameter carrying the module alias and payload
pub const OPEN_PARAM: &str = "open";

/// A built share link and how its payload was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub url: String,
    /// Payload length in characters, before percent-encoding
    pub length: usize,
    pub is_compressed: bool,
}

/// A sequence extracted from a share link
#[derive(Debug, Clone, PartialEq)]
pub struct DeepLink {
    pub module_alias: String,
    pub sequence: Sequence,
}

/// Build a shareable URL embedding the given sequence
///
/// The payload comes from the compression layer, so long sequences ride
/// compressed and short ones raw. Fails with `InvalidShareUrl` if the
/// origin does not parse or the alias is empty or contains a colon.
pub fn build_share_url(origin: &str, module_alias: &str, sequence: &Sequence) -> Result<ShareLink> {
    if module_alias.is_empty() || module_alias.contains(':') {
        return Err(CodecError::InvalidShareUrl(format!(
            "module alias {:?} must be non-empty and colon-free",
            module_alias
        )));
    }

    let mut url = Url::parse(origin)
        .map_err(|e| CodecError::InvalidShareUrl(format!("origin {:?}: {}", origin, e)))?;

    let compressed = compress_sequence(sequence);
    let length = compressed.payload.len();

    url.set_path("/");
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.append_pair(
            OPEN_PARAM,
            &format!("{}:{}", module_alias, compressed.payload),
        );
    }

    Ok(ShareLink {
        url: url.to_string(),
        length,
        is_compressed: compressed.is_compressed,
    })
}

/// Extract a sequence from a share URL or bare query string
///
/// Returns `Ok(None)` when there is no sequence in the link: absent
/// `open` parameter, no colon in its value, or an empty alias or
/// payload. Decode failures from the compression and sequence layers
/// propagate as errors so a corrupted link stays diagnosable.
pub fn parse_share_url(url_or_query: &str) -> Result<Option<DeepLink>> {
    let Some(value) = extract_open_param(url_or_query) else {
        return Ok(None);
    };

    let Some((alias, payload)) = value.split_once(':') else {
        return Ok(None);
    };
    if alias.is_empty() || payload.is_empty() {
        return Ok(None);
    }

    let sequence = decompress_sequence(payload)?;
    Ok(Some(DeepLink {
        module_alias: alias.to_string(),
        sequence,
    }))
}

/// Find the `open` parameter in a full URL or a bare query string
fn extract_open_param(input: &str) -> Option<String> {
    if let Ok(url) = Url::parse(input) {
        return url
            .query_pairs()
            .find(|(k, _)| k == OPEN_PARAM)
            .map(|(_, v)| v.into_owned());
    }

    // Not an absolute URL; treat the input as a raw query string
    let query = input.strip_prefix('?').unwrap_or(input);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == OPEN_PARAM)
        .map(|(_, v)| v.into_owned())
}
