//! Field-level validation of sanitized form input.
//!
//! Validation never fails through `Err` for anything but bad input: every shape or format
//! problem becomes a message on the field that caused it, collected into [`FieldErrors`].

use crate::form::{FormData, FormValue};
use crate::model::{
    CategoryId, PackageOption, ProductCreate, ProductFields, ProductImage, ProductUpdate,
    Technology,
};
use crate::sanitize::sanitize_value;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;
use url::Url;

pub const CATEGORY_NAME: &str = "categoryName";
pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const CATEGORY_ID: &str = "categoryId";
pub const LIVE_DEMO_LINK: &str = "liveDemoLink";
pub const GIT_HUB_LINK: &str = "gitHubLink";
pub const PRODUCT_TECHS: &str = "productTechs";
pub const PRODUCT_ADDONS: &str = "productAddons";
pub const IMAGE: &str = "image";

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MAX_IMAGE_SIZE: u64 = 15 * 1024 * 1024;

pub const IMAGE_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
    "image/bmp",
];

pub mod messages {
    pub const CATEGORY_NAME_REQUIRED: &str = "Category name is required.";
    pub const CATEGORY_NAME_TOO_LONG: &str = "Category name must be less than 100 characters";
    pub const NAME_REQUIRED: &str = "Product name is required";
    pub const NAME_TOO_LONG: &str = "Product name must be less than 100 characters";
    pub const DESCRIPTION_REQUIRED: &str = "Product description is required";
    pub const DESCRIPTION_TOO_LONG: &str = "Description must be less than 1000 characters";
    pub const CATEGORY_REQUIRED: &str = "Category is required";
    pub const IMAGE_REQUIRED: &str = "Product image is required";
    pub const IMAGE_INVALID: &str =
        "Image must be a valid file (JPEG, PNG, GIF, WebP, SVG, BMP) under 15MB";
    pub const TECH_REQUIRED: &str = "At least one technology is required";
    pub const TECH_INVALID: &str = "Technology name is required";
    pub const ADDON_REQUIRED: &str = "Exactly one addon is required";
    pub const ADDON_INVALID: &str =
        "Addon must be a valid package option (FullStack, Backend, Frontend, UI, UX)";
    pub const ADDON_TOO_MANY: &str = "Only one addon is allowed";
    pub const LIVE_DEMO_INVALID: &str = "Live demo link must be a valid URL";
    pub const GIT_HUB_INVALID: &str =
        "GitHub link must be a valid GitHub repository URL (e.g., https://github.com/user/repo)";
}

// ASCII word characters only in the owner and repository segments.
static GIT_HUB_REPO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?github\.com/[A-Za-z0-9_-]+/[A-Za-z0-9_-]+(/.*)?$")
        .expect("valid GitHub pattern")
});

/// Messages per field, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field`. Repeats of the same message are kept once.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        let messages = self.0.entry(field.to_string()).or_default();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The field's messages joined with `", "`.
    pub fn get(&self, field: &str) -> Option<String> {
        self.0.get(field).map(|messages| messages.join(", "))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
            .into_iter()
            .map(|(field, messages)| (field, messages.join(", ")))
            .collect()
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Whether a product image must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRule {
    Required,
    Optional,
}

/// Lengths are counted in UTF-16 code units, as browsers count them.
fn too_long(value: &str, max: usize) -> bool {
    value.encode_utf16().count() > max
}

/// A required, sanitized, length-capped text field.
fn required_text(
    form: &FormData,
    field: &str,
    max: usize,
    required: &str,
    too_long_message: &str,
    errors: &mut FieldErrors,
) -> String {
    let value = sanitize_value(form.get(field));
    if value.is_empty() {
        errors.add(field, required);
    } else if too_long(&value, max) {
        errors.add(field, too_long_message);
    }
    value
}

/// Parses a resource id as submitted in a path or form. Only the hyphenated form is accepted.
pub fn parse_id<I: FromStr>(raw: &str) -> Option<I> {
    if raw.len() != 36 {
        return None;
    }
    raw.parse().ok()
}

/// Validates a category form and returns the sanitized name.
pub fn validate_category(form: &FormData) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::new();
    let name = required_text(
        form,
        CATEGORY_NAME,
        MAX_NAME_LEN,
        messages::CATEGORY_NAME_REQUIRED,
        messages::CATEGORY_NAME_TOO_LONG,
        &mut errors,
    );
    errors.finish(|| name)
}

/// Validates a product form for creation; the image is mandatory.
pub fn validate_new_product(form: &FormData) -> Result<ProductCreate, FieldErrors> {
    let mut errors = FieldErrors::new();
    let fields = product_fields(form, &mut errors);
    let image = product_image(form, ImageRule::Required, &mut errors);
    match (fields, image) {
        (Some(fields), Some(image)) if errors.is_empty() => Ok(ProductCreate { fields, image }),
        _ => Err(errors),
    }
}

/// Validates a product form for update; a missing or empty file keeps the current image.
pub fn validate_product_update(form: &FormData) -> Result<ProductUpdate, FieldErrors> {
    let mut errors = FieldErrors::new();
    let fields = product_fields(form, &mut errors);
    let image = product_image(form, ImageRule::Optional, &mut errors);
    match fields {
        Some(fields) if errors.is_empty() => Ok(ProductUpdate { fields, image }),
        _ => Err(errors),
    }
}

fn product_fields(form: &FormData, errors: &mut FieldErrors) -> Option<ProductFields> {
    let name = required_text(
        form,
        NAME,
        MAX_NAME_LEN,
        messages::NAME_REQUIRED,
        messages::NAME_TOO_LONG,
        errors,
    );
    let description = required_text(
        form,
        DESCRIPTION,
        MAX_DESCRIPTION_LEN,
        messages::DESCRIPTION_REQUIRED,
        messages::DESCRIPTION_TOO_LONG,
        errors,
    );

    let category_id = form.get_text(CATEGORY_ID).and_then(parse_id::<CategoryId>);
    if category_id.is_none() {
        errors.add(CATEGORY_ID, messages::CATEGORY_REQUIRED);
    }

    let live_demo_link = optional_link(form, LIVE_DEMO_LINK, |url| url.is_some());
    let live_demo_link = match live_demo_link {
        Ok(link) => link,
        Err(()) => {
            errors.add(LIVE_DEMO_LINK, messages::LIVE_DEMO_INVALID);
            None
        }
    };

    let git_hub_link = optional_link(form, GIT_HUB_LINK, |url| {
        url.is_some_and(|raw| GIT_HUB_REPO.is_match(raw))
    });
    let git_hub_link = match git_hub_link {
        Ok(link) => link,
        Err(()) => {
            errors.add(GIT_HUB_LINK, messages::GIT_HUB_INVALID);
            None
        }
    };

    let technologies = technologies(form, errors);
    let addon = addon(form, errors);

    Some(ProductFields {
        name,
        description,
        category_id: category_id?,
        live_demo_link,
        git_hub_link,
        technologies: technologies?,
        addon: addon?,
    })
}

/// An optional absolute URL. Empty means absent. `accept` sees the raw value when it parses.
fn optional_link(
    form: &FormData,
    field: &str,
    accept: impl Fn(Option<&str>) -> bool,
) -> Result<Option<String>, ()> {
    match form.get(field) {
        None => Ok(None),
        Some(FormValue::Text(raw)) if raw.is_empty() => Ok(None),
        Some(FormValue::Text(raw)) => {
            let parsed = Url::parse(raw).ok().map(|_| raw.as_str());
            if accept(parsed) {
                Ok(Some(raw.clone()))
            } else {
                Err(())
            }
        }
        Some(FormValue::File(_)) => Err(()),
    }
}

#[derive(Deserialize)]
struct NamedOption {
    name: serde_json::Value,
}

/// Parses a JSON list of `{ "name": ... }` records. `None` when the part is not such a list.
fn named_list(form: &FormData, field: &str) -> Option<Vec<serde_json::Value>> {
    match form.get(field) {
        None => Some(Vec::new()),
        Some(FormValue::Text(raw)) => serde_json::from_str::<Vec<NamedOption>>(raw)
            .ok()
            .map(|list| list.into_iter().map(|option| option.name).collect()),
        Some(FormValue::File(_)) => None,
    }
}

fn technologies(form: &FormData, errors: &mut FieldErrors) -> Option<Vec<Technology>> {
    let Some(names) = named_list(form, PRODUCT_TECHS) else {
        errors.add(PRODUCT_TECHS, messages::TECH_REQUIRED);
        return None;
    };
    if names.is_empty() {
        errors.add(PRODUCT_TECHS, messages::TECH_REQUIRED);
        return None;
    }

    let mut technologies = Vec::with_capacity(names.len());
    for name in names {
        match name.as_str().map(str::trim) {
            Some(name) if !name.is_empty() => technologies.push(Technology {
                name: name.to_string(),
            }),
            _ => errors.add(PRODUCT_TECHS, messages::TECH_INVALID),
        }
    }
    Some(technologies).filter(|_| !errors.contains(PRODUCT_TECHS))
}

fn addon(form: &FormData, errors: &mut FieldErrors) -> Option<PackageOption> {
    let Some(names) = named_list(form, PRODUCT_ADDONS) else {
        errors.add(PRODUCT_ADDONS, messages::ADDON_REQUIRED);
        return None;
    };
    match names.len() {
        0 => errors.add(PRODUCT_ADDONS, messages::ADDON_REQUIRED),
        1 => {}
        _ => errors.add(PRODUCT_ADDONS, messages::ADDON_TOO_MANY),
    }

    let options: Vec<Option<PackageOption>> = names
        .iter()
        .map(|name| name.as_str().and_then(|name| name.parse().ok()))
        .collect();
    if options.iter().any(Option::is_none) {
        errors.add(PRODUCT_ADDONS, messages::ADDON_INVALID);
    }

    match options.as_slice() {
        [Some(option)] => Some(*option),
        _ => None,
    }
}

fn product_image(
    form: &FormData,
    rule: ImageRule,
    errors: &mut FieldErrors,
) -> Option<ProductImage> {
    let file = match form.get(IMAGE) {
        Some(FormValue::File(file)) => Some(file),
        // An untouched file input arrives as an empty text part.
        Some(FormValue::Text(text)) if text.is_empty() => None,
        Some(FormValue::Text(_)) => {
            errors.add(IMAGE, messages::IMAGE_INVALID);
            return None;
        }
        None => None,
    };

    let file = match (file, rule) {
        (Some(file), ImageRule::Optional) if file.size == 0 => return None,
        (Some(file), _) => file,
        (None, ImageRule::Required) => {
            errors.add(IMAGE, messages::IMAGE_REQUIRED);
            return None;
        }
        (None, ImageRule::Optional) => return None,
    };

    if file.size == 0 {
        errors.add(IMAGE, messages::IMAGE_REQUIRED);
    }
    if !IMAGE_TYPES.contains(&file.content_type.as_str()) || file.size > MAX_IMAGE_SIZE {
        errors.add(IMAGE, messages::IMAGE_INVALID);
    }
    if errors.contains(IMAGE) {
        return None;
    }
    Some(ProductImage {
        file_name: file.file_name.clone(),
        content_type: file.content_type.clone(),
        size: file.size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormFile;

    const CATEGORY: &str = "6f1c2a9e-3b4d-4c5e-8f70-1a2b3c4d5e6f";

    fn product_form() -> FormData {
        FormData::new()
            .text(NAME, "Starter Kit")
            .text(DESCRIPTION, "Everything to get going")
            .text(CATEGORY_ID, CATEGORY)
            .text(PRODUCT_TECHS, r#"[{"name": " Rust "}, {"name": "Tokio"}]"#)
            .text(PRODUCT_ADDONS, r#"[{"name": "FullStack"}]"#)
            .file(IMAGE, FormFile::new("kit.png", "image/png", 2048))
    }

    #[test]
    fn test_category_name_is_sanitized() {
        let form = FormData::new().text(CATEGORY_NAME, "  <b>Drinks</b> ");
        assert_eq!(validate_category(&form).unwrap(), "Drinks");
    }

    #[test]
    fn test_category_name_empty_after_sanitizing() {
        let form = FormData::new().text(CATEGORY_NAME, "<script>alert(1)</script>");
        let errors = validate_category(&form).unwrap_err();
        assert_eq!(
            errors.get(CATEGORY_NAME).as_deref(),
            Some(messages::CATEGORY_NAME_REQUIRED)
        );
    }

    #[test]
    fn test_category_name_length_limit() {
        let ok = FormData::new().text(CATEGORY_NAME, "a".repeat(100));
        assert!(validate_category(&ok).is_ok());

        let long = FormData::new().text(CATEGORY_NAME, "a".repeat(101));
        let errors = validate_category(&long).unwrap_err();
        assert_eq!(
            errors.get(CATEGORY_NAME).as_deref(),
            Some(messages::CATEGORY_NAME_TOO_LONG)
        );

        // Each emoji is two UTF-16 code units.
        let fifty = FormData::new().text(CATEGORY_NAME, "🍕".repeat(50));
        assert!(validate_category(&fifty).is_ok());
        let sixty = FormData::new().text(CATEGORY_NAME, "🍕".repeat(60));
        assert!(validate_category(&sixty).is_err());
    }

    #[test]
    fn test_valid_product() {
        let create = validate_new_product(&product_form()).unwrap();
        assert_eq!(create.fields.name, "Starter Kit");
        assert_eq!(create.fields.category_id.to_string(), CATEGORY);
        assert_eq!(
            create.fields.technologies,
            vec![
                Technology { name: "Rust".into() },
                Technology { name: "Tokio".into() }
            ]
        );
        assert_eq!(create.fields.addon, PackageOption::FullStack);
        assert_eq!(create.image.size, 2048);
        assert_eq!(create.fields.live_demo_link, None);
    }

    #[test]
    fn test_addon_count() {
        let none = product_form().text(PRODUCT_ADDONS, "[]");
        assert_eq!(
            validate_new_product(&none).unwrap_err().get(PRODUCT_ADDONS).as_deref(),
            Some(messages::ADDON_REQUIRED)
        );

        let two = product_form().text(PRODUCT_ADDONS, r#"[{"name": "UI"}, {"name": "UX"}]"#);
        assert_eq!(
            validate_new_product(&two).unwrap_err().get(PRODUCT_ADDONS).as_deref(),
            Some(messages::ADDON_TOO_MANY)
        );
    }

    #[test]
    fn test_addon_must_be_package_option() {
        let form = product_form().text(PRODUCT_ADDONS, r#"[{"name": "ui"}]"#);
        assert_eq!(
            validate_new_product(&form).unwrap_err().get(PRODUCT_ADDONS).as_deref(),
            Some(messages::ADDON_INVALID)
        );
    }

    #[test]
    fn test_multiple_messages_are_joined() {
        let form = product_form().text(PRODUCT_ADDONS, r#"[{"name": "UI"}, {"name": "Mobile"}]"#);
        let expected = format!("{}, {}", messages::ADDON_TOO_MANY, messages::ADDON_INVALID);
        assert_eq!(
            validate_new_product(&form).unwrap_err().get(PRODUCT_ADDONS),
            Some(expected)
        );
    }

    #[test]
    fn test_technologies() {
        let blank = product_form().text(PRODUCT_TECHS, r#"[{"name": "  "}]"#);
        assert_eq!(
            validate_new_product(&blank).unwrap_err().get(PRODUCT_TECHS).as_deref(),
            Some(messages::TECH_INVALID)
        );

        let empty = product_form().text(PRODUCT_TECHS, "[]");
        assert_eq!(
            validate_new_product(&empty).unwrap_err().get(PRODUCT_TECHS).as_deref(),
            Some(messages::TECH_REQUIRED)
        );

        let malformed = product_form().text(PRODUCT_TECHS, "not json");
        assert!(validate_new_product(&malformed)
            .unwrap_err()
            .contains(PRODUCT_TECHS));
    }

    #[test]
    fn test_category_id_must_be_hyphenated_uuid() {
        let simple = product_form().text(CATEGORY_ID, "6f1c2a9e3b4d4c5e8f701a2b3c4d5e6f");
        assert_eq!(
            validate_new_product(&simple).unwrap_err().get(CATEGORY_ID).as_deref(),
            Some(messages::CATEGORY_REQUIRED)
        );
    }

    #[test]
    fn test_links() {
        let form = product_form()
            .text(LIVE_DEMO_LINK, "https://demo.example.com")
            .text(GIT_HUB_LINK, "https://github.com/user/repo");
        let create = validate_new_product(&form).unwrap();
        assert_eq!(create.fields.live_demo_link.as_deref(), Some("https://demo.example.com"));
        assert_eq!(create.fields.git_hub_link.as_deref(), Some("https://github.com/user/repo"));

        let empty = product_form().text(LIVE_DEMO_LINK, "").text(GIT_HUB_LINK, "");
        assert!(validate_new_product(&empty).is_ok());

        let bad = product_form()
            .text(LIVE_DEMO_LINK, "not a url")
            .text(GIT_HUB_LINK, "https://gitlab.com/user/repo");
        let errors = validate_new_product(&bad).unwrap_err();
        assert_eq!(errors.get(LIVE_DEMO_LINK).as_deref(), Some(messages::LIVE_DEMO_INVALID));
        assert_eq!(errors.get(GIT_HUB_LINK).as_deref(), Some(messages::GIT_HUB_INVALID));

        let accented = product_form().text(GIT_HUB_LINK, "https://github.com/usér/répo");
        let errors = validate_new_product(&accented).unwrap_err();
        assert_eq!(errors.get(GIT_HUB_LINK).as_deref(), Some(messages::GIT_HUB_INVALID));
    }

    #[test]
    fn test_image_rules() {
        let missing = FormData::new()
            .text(NAME, "Kit")
            .text(DESCRIPTION, "Kit")
            .text(CATEGORY_ID, CATEGORY)
            .text(PRODUCT_TECHS, r#"[{"name": "Rust"}]"#)
            .text(PRODUCT_ADDONS, r#"[{"name": "UX"}]"#);
        assert_eq!(
            validate_new_product(&missing).unwrap_err().get(IMAGE).as_deref(),
            Some(messages::IMAGE_REQUIRED)
        );
        assert_eq!(validate_product_update(&missing).unwrap().image, None);

        let too_big =
            product_form().file(IMAGE, FormFile::new("a.png", "image/png", MAX_IMAGE_SIZE + 1));
        assert_eq!(
            validate_new_product(&too_big).unwrap_err().get(IMAGE).as_deref(),
            Some(messages::IMAGE_INVALID)
        );

        let pdf = product_form().file(IMAGE, FormFile::new("a.pdf", "application/pdf", 10));
        assert!(validate_product_update(&pdf).unwrap_err().contains(IMAGE));

        let empty_file =
            product_form().file(IMAGE, FormFile::new("", "application/octet-stream", 0));
        assert_eq!(validate_product_update(&empty_file).unwrap().image, None);
        assert!(validate_new_product(&empty_file).unwrap_err().contains(IMAGE));
    }

    #[test]
    fn test_all_failures_reported_together() {
        let errors = validate_new_product(&FormData::new()).unwrap_err();
        for field in [NAME, DESCRIPTION, CATEGORY_ID, PRODUCT_TECHS, PRODUCT_ADDONS, IMAGE] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(!errors.contains(LIVE_DEMO_LINK));
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id::<CategoryId>(CATEGORY).is_some());
        assert!(parse_id::<CategoryId>("").is_none());
        assert!(parse_id::<CategoryId>("not-an-id").is_none());
    }
}
