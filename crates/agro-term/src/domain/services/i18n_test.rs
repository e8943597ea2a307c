use std::collections::HashSet;

use agro_types::{RequestStatus, TaskState, WorkshopStatus};

use super::*;

#[test]
fn it_has_the_same_keys_in_every_language() {
    let es: HashSet<_> = ES.iter().map(|(k, _)| *k).collect();
    let en: HashSet<_> = EN.iter().map(|(k, _)| *k).collect();

    assert_eq!(es.len(), ES.len(), "duplicate key in the Spanish table");
    assert_eq!(es, en);
}

#[test]
fn it_translates_every_status_label() {
    let i18n = Translations::new(Language::En);
    let mut views = vec![StatusView::UNKNOWN];
    views.extend(RequestStatus::ALL.iter().map(|s| s.view()));
    views.extend(WorkshopStatus::ALL.iter().map(|s| s.view()));
    views.extend(
        [TaskState::Pending, TaskState::Completed, TaskState::Overdue]
            .iter()
            .map(|s| s.view()),
    );

    for view in views {
        assert_ne!(i18n.status(view), view.label_key);
    }
}

#[test]
fn it_falls_back_to_the_key() {
    let i18n = Translations::new(Language::Es);
    assert_eq!(i18n.t("no.such.key"), "no.such.key");
}

#[test]
fn it_fills_placeholders() {
    let i18n = Translations::new(Language::Es);
    assert_eq!(i18n.t_with("home.greeting", &[("name", "Ana")]), "Hola, Ana");
}

#[test]
fn it_formats_field_errors() {
    let i18n = Translations::new(Language::En);
    let error = FieldError::new("contrasena", "validation.required");
    assert_eq!(i18n.field_error(&error), "Password: This field is required.");
}
