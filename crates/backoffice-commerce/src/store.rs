//! Merchant storefronts managed from the back office.

use crate::error::{ensure, CommerceError};
use crate::ids::StoreId;
use crate::upload::ImageUpload;
use backoffice_data::MultipartForm;
use serde::{Deserialize, Serialize};

/// A store (tenant) as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    /// Logo reference; either an absolute URL or a path under the public
    /// asset root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Store {
    /// Resolve the logo to a URL a browser can load.
    ///
    /// See [`resolve_logo_url`].
    pub fn logo_url(&self, public_base: &str) -> Option<String> {
        resolve_logo_url(self.logo.as_deref(), public_base)
    }
}

/// Resolve a logo reference against the public asset base.
///
/// Absolute `http(s)` references are returned unchanged; relative ones are
/// appended to `public_base`. Empty references resolve to `None`.
pub fn resolve_logo_url(logo: Option<&str>, public_base: &str) -> Option<String> {
    let logo = logo.filter(|l| !l.is_empty())?;
    if logo.starts_with("http://") || logo.starts_with("https://") {
        return Some(logo.to_string());
    }
    let base = public_base.trim_end_matches('/');
    if logo.starts_with('/') {
        Some(format!("{}{}", base, logo))
    } else {
        Some(format!("{}/{}", base, logo))
    }
}

/// Data entered in the create/edit store form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreForm {
    pub name: String,
    pub picture: Option<ImageUpload>,
}

impl StoreForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            picture: None,
        }
    }

    /// Attach a logo image.
    pub fn with_picture(mut self, picture: ImageUpload) -> Self {
        self.picture = Some(picture);
        self
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        ensure(!self.name.is_empty(), "Store name is required")?;
        if let Some(picture) = &self.picture {
            picture.validate()?;
        }
        Ok(())
    }

    /// Encode as the multipart body the stores endpoint expects.
    pub fn to_multipart(&self) -> MultipartForm {
        let form = MultipartForm::new().text("name", self.name.clone());
        match &self.picture {
            Some(picture) => form.file(
                "picture",
                picture.file_name.clone(),
                picture.content_type.clone(),
                picture.bytes.clone(),
            ),
            None => form,
        }
    }
}
