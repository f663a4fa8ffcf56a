//! Registration form field descriptors

use crate::state::TextField;

/// Focusable areas of the registration form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationField {
    #[default]
    Map,
    Name,
    About,
    Images,
    Instructions,
    OpeningHours,
    OpenOnWeekends,
    /// Action panel (Confirm / Cancel)
    Actions,
}

impl RegistrationField {
    pub const ALL: [RegistrationField; 8] = [
        Self::Map,
        Self::Name,
        Self::About,
        Self::Images,
        Self::Instructions,
        Self::OpeningHours,
        Self::OpenOnWeekends,
        Self::Actions,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL
            .get(index)
            .copied()
            .unwrap_or(RegistrationField::Actions)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Map => "Location",
            Self::Name => "Name",
            Self::About => "About",
            Self::Images => "Photos",
            Self::Instructions => "Instructions",
            Self::OpeningHours => "Opening hours",
            Self::OpenOnWeekends => "Open on weekends",
            Self::Actions => "Actions",
        }
    }

    /// Free-text field backing this form field, if any
    pub fn text_field(&self) -> Option<TextField> {
        match self {
            Self::Name => Some(TextField::Name),
            Self::About => Some(TextField::About),
            Self::Instructions => Some(TextField::Instructions),
            Self::OpeningHours => Some(TextField::OpeningHours),
            _ => None,
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::About | Self::Instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trips() {
        for field in RegistrationField::ALL {
            assert_eq!(RegistrationField::from_index(field.index()), field);
        }
    }

    #[test]
    fn test_from_index_out_of_range_is_actions() {
        assert_eq!(
            RegistrationField::from_index(99),
            RegistrationField::Actions
        );
    }

    #[test]
    fn test_text_fields() {
        assert_eq!(RegistrationField::Name.text_field(), Some(TextField::Name));
        assert_eq!(RegistrationField::Map.text_field(), None);
        assert_eq!(RegistrationField::OpenOnWeekends.text_field(), None);
    }

    #[test]
    fn test_multiline_fields() {
        assert!(RegistrationField::About.is_multiline());
        assert!(RegistrationField::Instructions.is_multiline());
        assert!(!RegistrationField::Name.is_multiline());
    }
}
