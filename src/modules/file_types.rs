// File-type classification for tab labels (icons, editor language).

const IMAGE_EXTENSIONS: &[&str] = &["bmp", "png", "jpg", "jpeg", "ico"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileType {
    Image,
    Html,
    Js,
    Ts,
    Json,
    Css,
    Jsx,
    Tsx,
    Ttf,
    Other(String),
}

impl FileType {
    /// Classifies by the last extension. Labels without a dot have no type.
    pub fn from_label(label: &str) -> Option<Self> {
        let (_, ext) = label.rsplit_once('.')?;
        if IMAGE_EXTENSIONS.contains(&ext) {
            return Some(Self::Image);
        }
        Some(match ext {
            "html" => Self::Html,
            "js" => Self::Js,
            "ts" => Self::Ts,
            "json" => Self::Json,
            "css" => Self::Css,
            "jsx" => Self::Jsx,
            "tsx" => Self::Tsx,
            "ttf" => Self::Ttf,
            other => Self::Other(other.to_string()),
        })
    }

    /// Key into the icon table; unrecognised types fall back to "unknown".
    pub fn icon_key(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Html => "html",
            Self::Js => "js",
            Self::Ts => "ts",
            Self::Json => "json",
            Self::Css => "css",
            Self::Jsx => "jsx",
            Self::Tsx => "tsx",
            Self::Ttf => "ttf",
            Self::Other(_) => "unknown",
        }
    }
}

pub fn icon_key_for(label: &str) -> &'static str {
    FileType::from_label(label).map_or("unknown", |ft| ft.icon_key())
}
