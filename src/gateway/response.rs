// Response-envelope extraction helpers.
//
// Each helper is a small pure function over `GenerateResponse` so the
// gateway's fallback logic stays separate from envelope traversal.

use crate::protocol::ReviewLink;

use super::client::{GenerateResponse, InlineData};

/// Extract the display text of the first candidate: all text parts
/// concatenated. Returns `None` when there is no candidate or the
/// concatenated text is blank, which callers treat as an empty payload.
pub fn candidate_text(response: &GenerateResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let mut text = String::new();
    for part in &content.parts {
        if let Some(part_text) = &part.text {
            text.push_str(part_text);
        }
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Find the first inline image payload in the first candidate's parts.
pub fn first_inline_image(response: &GenerateResponse) -> Option<&InlineData> {
    let content = response.candidates.first()?.content.as_ref()?;
    content.parts.iter().find_map(|part| part.inline_data.as_ref())
}

/// Project the maps-tagged grounding citations of the first candidate into
/// `{uri, title}` links, preserving their upstream order. Citations without
/// a maps tag (e.g. web-search chunks) are excluded.
pub fn maps_links(response: &GenerateResponse) -> Vec<ReviewLink> {
    let Some(metadata) = response
        .candidates
        .first()
        .and_then(|c| c.grounding_metadata.as_ref())
    else {
        return Vec::new();
    };

    metadata
        .grounding_chunks
        .iter()
        .filter_map(|chunk| chunk.maps.as_ref())
        .map(|source| ReviewLink {
            uri: source.uri.clone(),
            title: source.title.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateResponse {
        serde_json::from_value(value).expect("test envelope should deserialize")
    }

    // -- candidate_text --

    #[test]
    fn candidate_text_concatenates_text_parts() {
        let resp = response(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Our Premier " }, { "text": "collection." }] }
            }]
        }));
        assert_eq!(candidate_text(&resp).as_deref(), Some("Our Premier collection."));
    }

    #[test]
    fn candidate_text_uses_first_candidate_only() {
        let resp = response(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }] } },
                { "content": { "parts": [{ "text": "second" }] } }
            ]
        }));
        assert_eq!(candidate_text(&resp).as_deref(), Some("first"));
    }

    #[test]
    fn candidate_text_blank_is_none() {
        let resp = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        }));
        assert_eq!(candidate_text(&resp), None);
    }

    #[test]
    fn candidate_text_missing_candidates_is_none() {
        assert_eq!(candidate_text(&response(json!({}))), None);
        assert_eq!(candidate_text(&response(json!({ "candidates": [] }))), None);
        assert_eq!(
            candidate_text(&response(json!({ "candidates": [{}] }))),
            None
        );
    }

    #[test]
    fn candidate_text_skips_non_text_parts() {
        let resp = response(json!({
            "candidates": [{
                "content": { "parts": [
                    { "inlineData": { "data": "QUJD" } },
                    { "text": "caption" }
                ] }
            }]
        }));
        assert_eq!(candidate_text(&resp).as_deref(), Some("caption"));
    }

    // -- first_inline_image --

    #[test]
    fn first_inline_image_scans_past_text_parts() {
        let resp = response(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "here is your visual" },
                    { "inlineData": { "mimeType": "image/png", "data": "Zmlyc3Q=" } },
                    { "inlineData": { "mimeType": "image/png", "data": "c2Vjb25k" } }
                ] }
            }]
        }));
        let image = first_inline_image(&resp).expect("image part present");
        assert_eq!(image.data, "Zmlyc3Q=");
    }

    #[test]
    fn first_inline_image_none_when_text_only() {
        let resp = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "no image here" }] } }]
        }));
        assert!(first_inline_image(&resp).is_none());
    }

    // -- maps_links --

    #[test]
    fn maps_links_keeps_maps_chunks_in_order() {
        let resp = response(json!({
            "candidates": [{
                "groundingMetadata": { "groundingChunks": [
                    { "maps": { "uri": "https://maps.example/one", "title": "One" } },
                    { "maps": { "uri": "https://maps.example/two", "title": "Two" } },
                    { "maps": { "uri": "https://maps.example/three", "title": "Three" } }
                ] }
            }]
        }));
        let links = maps_links(&resp);
        let titles: Vec<&str> = links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn maps_links_excludes_untagged_citations() {
        let resp = response(json!({
            "candidates": [{
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "uri": "https://web.example/a", "title": "Web A" } },
                    { "maps": { "uri": "https://maps.example/b", "title": "Maps B" } },
                    {},
                    { "maps": { "uri": "https://maps.example/c", "title": "Maps C" } }
                ] }
            }]
        }));
        let links = maps_links(&resp);
        assert_eq!(
            links,
            vec![
                ReviewLink {
                    uri: "https://maps.example/b".into(),
                    title: "Maps B".into(),
                },
                ReviewLink {
                    uri: "https://maps.example/c".into(),
                    title: "Maps C".into(),
                },
            ]
        );
    }

    #[test]
    fn maps_links_empty_without_grounding_metadata() {
        let resp = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "summary" }] } }]
        }));
        assert!(maps_links(&resp).is_empty());
        assert!(maps_links(&response(json!({}))).is_empty());
    }
}
