use serde::Serialize;

/// Static description of a bundled visual template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMeta {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub thumbnail_url: &'static str,
    pub data_ai_hint: &'static str,
}

const THUMBNAIL_PLACEHOLDER: &str = "https://placehold.co/200x280.png";

/// The bundled template catalogue. The first entry is the default selection.
pub const AVAILABLE_TEMPLATES: &[TemplateMeta] = &[
    TemplateMeta {
        id: "classic",
        name: "Classic Professional",
        description: "A timeless, elegant design suitable for all industries.",
        thumbnail_url: THUMBNAIL_PLACEHOLDER,
        data_ai_hint: "resume professional",
    },
    TemplateMeta {
        id: "modern",
        name: "Modern Minimalist",
        description: "Clean lines and a focus on content, perfect for tech roles.",
        thumbnail_url: THUMBNAIL_PLACEHOLDER,
        data_ai_hint: "resume modern",
    },
    TemplateMeta {
        id: "creative",
        name: "Creative Column",
        description: "A stylish two-column layout for creative professionals.",
        thumbnail_url: THUMBNAIL_PLACEHOLDER,
        data_ai_hint: "resume creative",
    },
    TemplateMeta {
        id: "academic",
        name: "Academic CV",
        description: "Detailed, comprehensive, ideal for research and academic roles.",
        thumbnail_url: THUMBNAIL_PLACEHOLDER,
        data_ai_hint: "cv academic",
    },
    TemplateMeta {
        id: "compact",
        name: "Compact Info",
        description: "Space-saving design to pack more information, great for experienced pros.",
        thumbnail_url: THUMBNAIL_PLACEHOLDER,
        data_ai_hint: "resume compact",
    },
];

pub fn find_template(id: &str) -> Option<&'static TemplateMeta> {
    AVAILABLE_TEMPLATES.iter().find(|t| t.id == id)
}

pub fn is_known_template(id: &str) -> bool {
    find_template(id).is_some()
}

pub fn default_template_id() -> &'static str {
    AVAILABLE_TEMPLATES
        .first()
        .map(|t| t.id)
        .unwrap_or("classic")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_is_first_in_catalogue() {
        assert_eq!(default_template_id(), "classic");
    }

    #[test]
    fn test_template_ids_are_unique() {
        let mut ids: Vec<_> = AVAILABLE_TEMPLATES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), AVAILABLE_TEMPLATES.len());
    }

    #[test]
    fn test_find_template() {
        assert_eq!(find_template("creative").map(|t| t.name), Some("Creative Column"));
        assert!(find_template("unknown").is_none());
        assert!(!is_known_template(""));
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let json = serde_json::to_value(&AVAILABLE_TEMPLATES[0]).unwrap();
        assert_eq!(json["thumbnailUrl"], THUMBNAIL_PLACEHOLDER);
        assert_eq!(json["dataAiHint"], "resume professional");
    }
}
