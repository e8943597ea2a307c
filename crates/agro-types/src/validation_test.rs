use super::*;

fn login(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn test_login_requires_password() {
    let errors = login("ana@agro.test", "").validate().unwrap_err();
    assert_eq!(errors.fields().len(), 1);
    assert_eq!(errors.for_field("contrasena").unwrap().message_key, REQUIRED);
}

#[test]
fn test_login_requires_email_and_format() {
    let errors = login("", "secreta").validate().unwrap_err();
    assert_eq!(errors.for_field("correo").unwrap().message_key, REQUIRED);

    let errors = login("ana.agro.test", "secreta").validate().unwrap_err();
    assert_eq!(errors.for_field("correo").unwrap().message_key, INVALID_EMAIL);
}

#[test]
fn test_login_into_request_trims_email() {
    let request = login("  ana@agro.test ", "secreta").into_request().unwrap();
    assert_eq!(request.correo, "ana@agro.test");
    assert_eq!(request.contrasena, "secreta");
}

#[test]
fn test_registration_reports_every_field() {
    let form = RegistrationForm {
        name: " ".to_string(),
        email: "no-es-correo".to_string(),
        phone: "abc".to_string(),
        password: "corta".to_string(),
        confirmation: "otra".to_string(),
    };
    let errors = form.validate().unwrap_err();

    assert_eq!(errors.for_field("nombre").unwrap().message_key, REQUIRED);
    assert_eq!(errors.for_field("correo").unwrap().message_key, INVALID_EMAIL);
    assert_eq!(errors.for_field("telefono").unwrap().message_key, INVALID_PHONE);
    assert_eq!(errors.for_field("contrasena").unwrap().message_key, PASSWORD_TOO_SHORT);
    assert_eq!(errors.for_field("confirmacion").unwrap().message_key, PASSWORD_MISMATCH);
}

#[test]
fn test_registration_creates_farmer_account() {
    let form = RegistrationForm {
        name: "Lucía Pérez".to_string(),
        email: "lucia@agro.test".to_string(),
        phone: String::new(),
        password: "cosecha2024".to_string(),
        confirmation: "cosecha2024".to_string(),
    };
    let request = form.into_request().unwrap();

    assert_eq!(request.rol, Role::Farmer);
    assert_eq!(request.telefono, None);
}

#[test]
fn test_password_update_only_sends_password() {
    let update = PasswordUpdateForm {
        password: "nuevaClave1".to_string(),
        confirmation: "nuevaClave1".to_string(),
    }
    .into_update()
    .unwrap();

    assert_eq!(update.password.as_deref(), Some("nuevaClave1"));
    assert!(update.name.is_none() && update.email.is_none());
}

#[test]
fn test_task_form_date_checks() {
    let form = TaskForm {
        title: "Poda".to_string(),
        description: String::new(),
        due_date: "31/01/2024".to_string(),
    };
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.for_field("fecha_vencimiento").unwrap().message_key, INVALID_DATE);

    let trailing = TaskForm {
        title: "Poda".to_string(),
        description: String::new(),
        due_date: "2024-01-01xyz".to_string(),
    };
    assert!(trailing.into_input(3, TaskStatus::Pending).is_err());

    let input = TaskForm {
        title: "Poda".to_string(),
        description: " ".to_string(),
        due_date: "2024-01-31".to_string(),
    }
    .into_input(3, TaskStatus::Pending)
    .unwrap();
    assert_eq!(input.plan_id, 3);
    assert_eq!(input.description, None);
    assert_eq!(input.due_date, NaiveDate::from_ymd_opt(2024, 1, 31));
}

#[test]
fn test_empty_workshop_selection_is_blocked() {
    let errors = WorkshopSelection::default().into_input().unwrap_err();
    assert_eq!(errors.for_field("talleres").unwrap().message_key, NO_WORKSHOP_SELECTED);

    let input = WorkshopSelection {
        workshop_ids: vec![2, 5],
    }
    .into_input()
    .unwrap();
    assert_eq!(input.workshop_ids, vec![2, 5]);
}

#[test]
fn test_workshop_form_cost() {
    let mut form = WorkshopForm {
        name: "Manejo integrado de plagas".to_string(),
        description: String::new(),
        date: "2024-06-01".to_string(),
        cost: "-4".to_string(),
    };
    assert_eq!(
        form.validate().unwrap_err().for_field("costo").unwrap().message_key,
        INVALID_AMOUNT
    );

    form.cost = "350,50".to_string();
    let input = form.into_input(WorkshopStatus::Upcoming).unwrap();
    assert_eq!(input.cost, Some(350.5));
}

#[test]
fn test_contact_form_to_client_update() {
    let update = ContactForm {
        name: " Ana ".to_string(),
        email: "ana@agro.test".to_string(),
        phone: "+52 555 123 4567".to_string(),
    }
    .into_client_update()
    .unwrap();
    assert_eq!(update.name, "Ana");
    assert_eq!(update.phone.as_deref(), Some("+52 555 123 4567"));
}

#[test]
fn test_cleared_phone_is_still_sent() {
    let form = ContactForm {
        name: "Ana".to_string(),
        email: "ana@agro.test".to_string(),
        phone: " ".to_string(),
    };

    let profile = serde_json::to_value(form.clone().into_profile_update().unwrap()).unwrap();
    assert_eq!(profile["telefono"], "");

    let client = serde_json::to_value(form.into_client_update().unwrap()).unwrap();
    assert_eq!(client["telefono"], "");
}

#[test]
fn test_payment_proof_requires_reference() {
    assert!(PaymentProofForm::default().into_proof(1).is_err());
    let proof = PaymentProofForm {
        reference: "SPEI-0042".to_string(),
    }
    .into_proof(9)
    .unwrap();
    assert_eq!(proof.request_id, 9);
}
