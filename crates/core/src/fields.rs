#![forbid(unsafe_code)]

use serde::Serialize;

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const CHANGE_SUMMARY_MAX_CHARS: usize = 500;
pub const TAG_NAME_MAX_CHARS: usize = 50;
pub const TAG_DESCRIPTION_MAX_CHARS: usize = 200;
pub const DEFAULT_TAG_COLOR: &str = "#6B7280";

/// The versioned part of a document. Two snapshots with equal fields are the same revision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentFields {
    pub title: String,
    pub content: String,
    pub description: Option<String>,
}

impl DocumentFields {
    pub fn try_new(
        title: &str,
        content: &str,
        description: Option<&str>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            title: normalize_title(title)?,
            content: normalize_content(content)?,
            description: normalize_description(description)?,
        })
    }
}

/// Partial edit of [`DocumentFields`]. `None` keeps the current value; an empty
/// description clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldsPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
}

impl FieldsPatch {
    pub fn apply(&self, current: &DocumentFields) -> Result<DocumentFields, FieldError> {
        let title = match self.title.as_deref() {
            Some(title) => normalize_title(title)?,
            None => current.title.clone(),
        };
        let content = match self.content.as_deref() {
            Some(content) => normalize_content(content)?,
            None => current.content.clone(),
        };
        let description = match self.description.as_deref() {
            Some(description) => normalize_description(Some(description))?,
            None => current.description.clone(),
        };
        Ok(DocumentFields {
            title,
            content,
            description,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.description.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    TitleEmpty,
    TitleTooLong,
    ContentEmpty,
    DescriptionTooLong,
    ChangeSummaryTooLong,
    TagNameEmpty,
    TagNameTooLong,
    TagDescriptionTooLong,
    InvalidColor,
}

impl FieldError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::TitleEmpty => "title must not be empty",
            Self::TitleTooLong => "title is too long",
            Self::ContentEmpty => "content must not be empty",
            Self::DescriptionTooLong => "description is too long",
            Self::ChangeSummaryTooLong => "change_summary is too long",
            Self::TagNameEmpty => "tag name must not be empty",
            Self::TagNameTooLong => "tag name is too long",
            Self::TagDescriptionTooLong => "tag description is too long",
            Self::InvalidColor => "tag color must be #RRGGBB",
        }
    }
}

fn normalize_title(value: &str) -> Result<String, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::TitleEmpty);
    }
    if value.chars().count() > TITLE_MAX_CHARS {
        return Err(FieldError::TitleTooLong);
    }
    Ok(value.to_string())
}

fn normalize_content(value: &str) -> Result<String, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::ContentEmpty);
    }
    Ok(value.to_string())
}

fn normalize_description(value: Option<&str>) -> Result<Option<String>, FieldError> {
    optional_text(value, DESCRIPTION_MAX_CHARS, FieldError::DescriptionTooLong)
}

pub fn normalize_change_summary(value: Option<&str>) -> Result<Option<String>, FieldError> {
    optional_text(
        value,
        CHANGE_SUMMARY_MAX_CHARS,
        FieldError::ChangeSummaryTooLong,
    )
}

pub fn normalize_tag_name(value: &str) -> Result<String, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::TagNameEmpty);
    }
    if value.chars().count() > TAG_NAME_MAX_CHARS {
        return Err(FieldError::TagNameTooLong);
    }
    Ok(value.to_string())
}

pub fn normalize_tag_description(value: Option<&str>) -> Result<Option<String>, FieldError> {
    optional_text(
        value,
        TAG_DESCRIPTION_MAX_CHARS,
        FieldError::TagDescriptionTooLong,
    )
}

pub fn normalize_tag_color(value: Option<&str>) -> Result<String, FieldError> {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(DEFAULT_TAG_COLOR.to_string());
    };
    let Some(hex) = value.strip_prefix('#') else {
        return Err(FieldError::InvalidColor);
    };
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(FieldError::InvalidColor);
    }
    Ok(format!("#{}", hex.to_ascii_uppercase()))
}

fn optional_text(
    value: Option<&str>,
    max_chars: usize,
    too_long: FieldError,
) -> Result<Option<String>, FieldError> {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > max_chars {
        return Err(too_long);
    }
    Ok(Some(value.to_string()))
}
