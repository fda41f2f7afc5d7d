use newsdesk_api::{Draft, DraftError, NewsPayload, Record, RecordId};

use super::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Subtitle,
    Excerpt,
    Content,
    CoverImage,
    Category,
    Tags,
    AuthorName,
    AuthorCompany,
    DestinationUrl,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::Title,
        FormField::Subtitle,
        FormField::Excerpt,
        FormField::Content,
        FormField::CoverImage,
        FormField::Category,
        FormField::Tags,
        FormField::AuthorName,
        FormField::AuthorCompany,
        FormField::DestinationUrl,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Subtitle => "Subtitle",
            FormField::Excerpt => "Excerpt",
            FormField::Content => "Content",
            FormField::CoverImage => "Cover image URL",
            FormField::Category => "Category",
            FormField::Tags => "Tags (comma separated)",
            FormField::AuthorName => "Author",
            FormField::AuthorCompany => "Author company",
            FormField::DestinationUrl => "Destination URL",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            FormField::Title | FormField::Content | FormField::Category
        )
    }

    pub fn is_multiline(self) -> bool {
        self == FormField::Content
    }
}

/// The request a submit resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Create(NewsPayload),
    Update(RecordId, NewsPayload),
}

/// Form state of the record editor.
///
/// Each text field has its own input buffer; every edit writes the buffer back
/// into the one draft attribute it belongs to.
#[derive(Debug, Clone)]
pub struct EditorState {
    target: Option<Record>,
    pub draft: Draft,
    pub focused: FormField,
    inputs: Vec<TextInput>,
    pub busy: bool,
}

impl EditorState {
    pub fn new(target: Option<Record>) -> Self {
        let draft = target.as_ref().map(Draft::from_record).unwrap_or_default();
        let inputs = FormField::ALL
            .iter()
            .map(|field| TextInput::from(field_text(&draft, *field).as_str()))
            .collect();

        Self {
            target,
            draft,
            focused: FormField::Title,
            inputs,
            busy: false,
        }
    }

    /// The record being edited, `None` when creating a new one.
    pub fn target(&self) -> Option<&Record> {
        self.target.as_ref()
    }

    pub fn input(&self, field: FormField) -> &TextInput {
        &self.inputs[field.index()]
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_previous(&mut self) {
        self.focused = self.focused.previous();
    }

    pub fn input_char(&mut self, c: char) {
        if self.focused == FormField::Category {
            return;
        }
        self.inputs[self.focused.index()].insert(c);
        self.sync_focused();
    }

    pub fn backspace(&mut self) {
        if self.focused == FormField::Category {
            return;
        }
        self.inputs[self.focused.index()].backspace();
        self.sync_focused();
    }

    pub fn clear_field(&mut self) {
        if self.focused == FormField::Category {
            return;
        }
        self.inputs[self.focused.index()].clear();
        self.sync_focused();
    }

    /// Left/right: move the cursor, or cycle the category.
    pub fn move_cursor(&mut self, left: bool) {
        if self.focused == FormField::Category {
            self.draft.category = if left {
                self.draft.category.previous()
            } else {
                self.draft.category.next()
            };
            return;
        }
        let input = &mut self.inputs[self.focused.index()];
        if left {
            input.move_left();
        } else {
            input.move_right();
        }
    }

    pub fn cursor_home_end(&mut self, home: bool) {
        let input = &mut self.inputs[self.focused.index()];
        if home {
            input.home();
        } else {
            input.end();
        }
    }

    fn sync_focused(&mut self) {
        let value = self.inputs[self.focused.index()].value.clone();
        let draft = &mut self.draft;
        match self.focused {
            FormField::Title => draft.title = value,
            FormField::Subtitle => draft.subtitle = value,
            FormField::Excerpt => draft.excerpt = value,
            FormField::Content => draft.content = value,
            FormField::CoverImage => draft.cover_image = value,
            FormField::Category => {}
            FormField::Tags => draft.set_tags_input(&value),
            FormField::AuthorName => draft.author_name = value,
            FormField::AuthorCompany => draft.author_company = value,
            FormField::DestinationUrl => draft.destination_url = value,
        }
    }

    /// Validate the draft and mark the editor busy.
    ///
    /// Returns `Ok(None)` while a previous submit is still in flight.
    pub fn begin_submit(&mut self) -> Result<Option<SubmitRequest>, DraftError> {
        if self.busy {
            return Ok(None);
        }
        let payload = NewsPayload::try_from(&self.draft)?;
        self.busy = true;

        Ok(Some(match self.draft.id.clone() {
            Some(id) => SubmitRequest::Update(id, payload),
            None => SubmitRequest::Create(payload),
        }))
    }

    pub fn finish_submit(&mut self) {
        self.busy = false;
    }
}

fn field_text(draft: &Draft, field: FormField) -> String {
    match field {
        FormField::Title => draft.title.clone(),
        FormField::Subtitle => draft.subtitle.clone(),
        FormField::Excerpt => draft.excerpt.clone(),
        FormField::Content => draft.content.clone(),
        FormField::CoverImage => draft.cover_image.clone(),
        FormField::Category => draft.category.label().to_string(),
        FormField::Tags => draft.tags_input(),
        FormField::AuthorName => draft.author_name.clone(),
        FormField::AuthorCompany => draft.author_company.clone(),
        FormField::DestinationUrl => draft.destination_url.clone(),
    }
}
