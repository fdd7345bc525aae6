use crate::domain::model::Rarity;
use crate::utils::error::LibraryError;
use std::str::FromStr;
use url::form_urlencoded;

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://ff-iconlibrary.vercel.app/api/img";
pub const DEFAULT_RARITY_BACKGROUND_BASE: &str =
    "https://raw.githubusercontent.com/MACBRUH-OFC/FreeFire-Resources/refs/heads/main/Others";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Id,
    Icon,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Id => "id",
            ImageKind::Icon => "icon",
        }
    }
}

impl FromStr for ImageKind {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(ImageKind::Id),
            "icon" => Ok(ImageKind::Icon),
            other => Err(LibraryError::BadImageType {
                kind: other.to_string(),
            }),
        }
    }
}

pub fn image_url(base: &str, kind: ImageKind, value: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    format!("{}?type={}&value={}", base, kind.as_str(), encoded)
}

/// 稀有度對應的背景圖，未知的稀有度使用 Blue
pub fn rarity_background_url(base: &str, rarity: &str) -> String {
    let rarity = rarity.parse::<Rarity>().unwrap_or(Rarity::Blue);
    format!("{}/Prize-{}.png", base.trim_end_matches('/'), rarity.background_tag())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_templates() {
        assert_eq!(
            image_url(DEFAULT_IMAGE_BASE_URL, ImageKind::Id, "12345"),
            "https://ff-iconlibrary.vercel.app/api/img?type=id&value=12345"
        );
        assert_eq!(
            image_url("http://img.local/api", ImageKind::Icon, "Icon_AWM"),
            "http://img.local/api?type=icon&value=Icon_AWM"
        );
    }

    #[test]
    fn test_image_value_is_encoded() {
        assert_eq!(
            image_url("http://img.local", ImageKind::Icon, "a&b=c d"),
            "http://img.local?type=icon&value=a%26b%3Dc+d"
        );
    }

    #[test]
    fn test_unknown_image_kind_is_rejected() {
        let err = "bogus".parse::<ImageKind>().unwrap_err();
        assert!(matches!(err, LibraryError::BadImageType { ref kind } if kind == "bogus"));
    }

    #[test]
    fn test_rarity_background_url() {
        assert_eq!(
            rarity_background_url("http://cdn.local/Others/", "Orange_Plus"),
            "http://cdn.local/Others/Prize-OrangePlus.png"
        );
        assert_eq!(
            rarity_background_url("http://cdn.local/Others", "Mythic"),
            "http://cdn.local/Others/Prize-Blue.png"
        );
    }
}
