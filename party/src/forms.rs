//! Text-entry forms for the distribution and add-member screens.

use party_core::Denomination;

/// Longest value accepted in one field.
const MAX_FIELD_LEN: usize = 30;

/// Which form a screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Coins,
    Experience,
    AddMember,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::Coins => " Distribute Money ",
            FormKind::Experience => " Distribute Experience ",
            FormKind::AddMember => " Add Member ",
        }
    }
}

/// One labelled text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

impl FormField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
        }
    }
}

/// A column of fields followed by a submit button.
///
/// Focus runs over the fields and then the button at `fields.len()`.
#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    pub fn new(kind: FormKind) -> Self {
        let mut fields = Vec::new();
        match kind {
            FormKind::Coins => {}
            FormKind::Experience => fields.push(FormField::new("Experience")),
            FormKind::AddMember => {
                fields.push(FormField::new("Name"));
                fields.push(FormField::new("Experience"));
            }
        }
        if matches!(kind, FormKind::Coins | FormKind::AddMember) {
            fields.extend(Denomination::ALL.iter().map(|d| FormField::new(d.name())));
        }

        Self {
            kind,
            fields,
            focus: 0,
        }
    }

    /// Whether the submit button has focus.
    pub fn on_submit(&self) -> bool {
        self.focus == self.fields.len()
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (self.fields.len() + 1);
    }

    pub fn focus_prev(&mut self) {
        let slots = self.fields.len() + 1;
        self.focus = (self.focus + slots - 1) % slots;
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.value.chars().count() < MAX_FIELD_LEN {
                field.value.push(c);
            }
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Raw value of the field with the given label.
    pub fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Raw values of the five coin fields, in canonical order.
    pub fn coin_values(&self) -> [&str; 5] {
        Denomination::ALL.map(|d| self.value(d.name()))
    }
}
