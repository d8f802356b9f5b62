//! # Comment Form
//!
//! Field state and validation for adding a comment to the open post.
//!
//! Each field carries its own error flag. Editing a field clears only that
//! field's flag; submitting re-evaluates all three. Nothing is cleared on a
//! rejected submit, so the user can fix the flagged fields in place.

use std::sync::LazyLock;

use regex::Regex;

use crate::api::{CommentDraft, PostId};

/// Minimal email shape: `local@domain.tld`, no whitespace, exactly one `@`.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Body,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Author Name",
            Field::Email => "Author Email",
            Field::Body => "Comment Text",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Field::Name => "Name is required",
            Field::Email => "Email is required",
            Field::Body => "Enter some text",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentForm {
    pub name: String,
    pub email: String,
    pub body: String,
    pub name_error: bool,
    pub email_error: bool,
    pub body_error: bool,
    /// A submission is in flight; submit is disabled until it settles.
    pub submitting: bool,
}

impl CommentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Body => &self.body,
        }
    }

    pub fn has_error(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name_error,
            Field::Email => self.email_error,
            Field::Body => self.body_error,
        }
    }

    /// Replace a field's value. Clears that field's error flag.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let (text, error) = self.slot_mut(field);
        *text = value.into();
        *error = false;
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        let (text, error) = self.slot_mut(field);
        text.push(c);
        *error = false;
    }

    pub fn pop_char(&mut self, field: Field) {
        let (text, error) = self.slot_mut(field);
        text.pop();
        *error = false;
    }

    fn slot_mut(&mut self, field: Field) -> (&mut String, &mut bool) {
        match field {
            Field::Name => (&mut self.name, &mut self.name_error),
            Field::Email => (&mut self.email, &mut self.email_error),
            Field::Body => (&mut self.body, &mut self.body_error),
        }
    }

    /// Re-evaluate every field, updating the error flags.
    ///
    /// Returns the trimmed draft when all fields pass.
    pub fn validate(&mut self, post_id: PostId) -> Option<CommentDraft> {
        self.name_error = self.name.trim().is_empty();
        self.email_error = self.email.trim().is_empty() || !EMAIL_SHAPE.is_match(&self.email);
        self.body_error = self.body.trim().is_empty();

        if self.name_error || self.email_error || self.body_error {
            return None;
        }

        Some(CommentDraft {
            post_id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            body: self.body.trim().to_string(),
        })
    }

    /// The comment was created: keep the author, drop the text.
    pub fn accept(&mut self) {
        self.body.clear();
        self.body_error = false;
        self.submitting = false;
    }

    /// Reset all three fields and their flags, whatever their state.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.body.clear();
        self.name_error = false;
        self.email_error = false;
        self.body_error = false;
    }
}
