use super::*;
use crate::test_support::FakeAuth;

fn filled_form() -> SignupForm {
    let mut form = SignupForm::new();
    form.handle_change(Field::FirstName, "Ana");
    form.handle_change(Field::LastName, "Souza");
    form.handle_change(Field::Email, "ana@email.com");
    form.handle_change(Field::Phone, "11988887777");
    form.handle_change(Field::Password, "segredo");
    form.handle_change(Field::ConfirmPassword, "segredo");
    form
}

#[test]
fn empty_form_reports_every_required_field() {
    let errors = SignupForm::new().validate();
    assert_eq!(errors.get(&Field::FirstName), Some(&"Nome é obrigatório"));
    assert_eq!(errors.get(&Field::LastName), Some(&"Sobrenome é obrigatório"));
    assert_eq!(errors.get(&Field::Email), Some(&"E-mail é obrigatório"));
    assert_eq!(errors.get(&Field::Phone), Some(&"Telefone é obrigatório"));
    assert_eq!(errors.get(&Field::Password), Some(&"Senha é obrigatória"));
    // both passwords empty, so they match
    assert_eq!(errors.get(&Field::ConfirmPassword), None);
}

#[test]
fn filled_form_is_valid() {
    assert!(filled_form().validate().is_empty());
}

#[test]
fn email_shape_is_checked() {
    for bad in ["ana", "ana@email", "@email.com", "ana email@x.com"] {
        let mut form = filled_form();
        form.handle_change(Field::Email, bad);
        let errors = form.validate();
        if bad == "ana email@x.com" {
            // `\S+@\S+\.\S+` is unanchored, so the tail still matches
            assert!(errors.is_empty(), "{bad}");
        } else {
            assert_eq!(errors.get(&Field::Email), Some(&"E-mail inválido"), "{bad}");
        }
    }
}

#[test]
fn short_and_mismatched_passwords() {
    let mut form = filled_form();
    form.handle_change(Field::Password, "12345");
    let errors = form.validate();
    assert_eq!(
        errors.get(&Field::Password),
        Some(&"Senha deve ter pelo menos 6 caracteres")
    );
    assert_eq!(errors.get(&Field::ConfirmPassword), Some(&"Senhas não conferem"));
}

#[test]
fn editing_a_field_clears_its_error() {
    let mut form = SignupForm::new();
    let err = form
        .to_signup_request(false, None)
        .expect_err("empty form");
    assert!(matches!(err, RegistrationError::Invalid(ref e) if e.len() == 5));
    assert!(form.errors().contains_key(&Field::Phone));

    form.handle_change(Field::Phone, "11");

    assert!(!form.errors().contains_key(&Field::Phone));
    assert!(form.errors().contains_key(&Field::FirstName));
}

#[test]
fn valid_form_becomes_signup_request() {
    let mut form = filled_form();
    let request = form.to_signup_request(true, None).expect("valid");

    assert_eq!(request.name, "Ana Souza");
    assert_eq!(request.email, "ana@email.com");
    assert_eq!(request.phone, "11988887777");
    assert!(request.restaurant);
    assert!(request.image.is_none());
}

#[tokio::test]
async fn submit_sends_signup_through_the_api() {
    let api = FakeAuth::failing_signup();
    let mut form = filled_form();
    let err = form
        .submit(&api, false, None)
        .await
        .expect_err("conflict");
    assert!(matches!(err, RegistrationError::Api(ClientError::Status { status: 409, .. })));

    let api = FakeAuth::answering(crate::test_support::LoginReply::Fail(
        crate::test_support::unauthorized,
    ));
    let response = form.submit(&api, false, None).await.expect("created");
    assert_eq!(response["created"], "ana@email.com");
    assert_eq!(api.signups.lock().expect("lock").len(), 1);
}

#[tokio::test]
async fn invalid_form_never_reaches_the_api() {
    let api = FakeAuth::failing_signup();
    let mut form = SignupForm::new();
    let err = form.submit(&api, true, None).await.expect_err("invalid");
    assert!(matches!(err, RegistrationError::Invalid(_)));
    assert!(api.signups.lock().expect("lock").is_empty());
}
