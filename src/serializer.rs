use crate::compat::String;
use crate::url::{Url, UrlKind};
use core::fmt::Write;

/// Serialize a URL record, optionally leaving out the fragment.
pub fn serialize(url: &Url, exclude_fragment: bool) -> String {
    let mut output = String::with_capacity(64);
    output.push_str(&url.scheme);
    output.push(':');

    match &url.kind {
        UrlKind::Hierarchical(hierarchy) => {
            if let Some(host) = &hierarchy.host {
                output.push_str("//");
                if hierarchy.includes_credentials() {
                    output.push_str(&hierarchy.username);
                    if !hierarchy.password.is_empty() {
                        output.push(':');
                        output.push_str(&hierarchy.password);
                    }
                    output.push('@');
                }
                let _ = write!(output, "{host}");
                if let Some(port) = hierarchy.port {
                    let _ = write!(output, ":{port}");
                }
            } else if hierarchy.path.len() > 1 && hierarchy.path[0].is_empty() {
                // Without it "//" at the start of the path would re-parse as an authority
                output.push_str("/.");
            }
            push_segments(&mut output, &hierarchy.path);
        }
        UrlKind::Opaque(path) => output.push_str(path),
    }

    if let Some(query) = &url.query {
        output.push('?');
        output.push_str(query);
    }
    if !exclude_fragment && let Some(fragment) = &url.fragment {
        output.push('#');
        output.push_str(fragment);
    }

    output
}

/// URL path serializer: the opaque path verbatim, or `/`-prefixed segments
pub fn serialize_path(kind: &UrlKind) -> String {
    match kind {
        UrlKind::Opaque(path) => path.clone(),
        UrlKind::Hierarchical(hierarchy) => {
            let mut output = String::new();
            push_segments(&mut output, &hierarchy.path);
            output
        }
    }
}

fn push_segments(output: &mut String, segments: &[String]) {
    for segment in segments {
        output.push('/');
        output.push_str(segment);
    }
}
