use otpgate::error::OtpServiceError;
use otpgate::usecase::register::RegisterDeviceInput;
use otpgate_totp::Identity;

use crate::helpers::{Harness, SCENARIO_SECRET, T0, at, verify_input};

fn register_input(device_id: &str) -> RegisterDeviceInput {
    RegisterDeviceInput {
        device_id: device_id.to_owned(),
    }
}

#[tokio::test]
async fn should_store_credential_for_new_device() {
    let h = Harness::new();

    let registration = h
        .register_usecase()
        .execute(register_input("dev-1"))
        .await
        .unwrap();

    assert_eq!(registration.identity.as_str(), "dev-1");
    assert_eq!(registration.created_at, at(T0));
    assert_eq!(registration.secret.as_str().len(), 32);
    assert!(
        registration
            .provisioning_uri
            .starts_with("otpauth://totp/Test%20Issuer:dev-1?"),
        "unexpected uri {}",
        registration.provisioning_uri
    );
    assert!(
        registration
            .provisioning_uri
            .contains(&format!("secret={}", registration.secret.as_str()))
    );

    let stored = h
        .credentials()
        .get(&Identity::new("dev-1").unwrap())
        .await
        .unwrap()
        .expect("credential should be stored");
    assert_eq!(stored.secret, registration.secret);
}

#[tokio::test]
async fn should_verify_code_from_generated_secret() {
    let h = Harness::new();
    let registration = h
        .register_usecase()
        .execute(register_input("dev-1"))
        .await
        .unwrap();
    let code = h.code_at(&registration.secret, T0);

    h.verify_usecase()
        .execute(verify_input("dev-1", &code))
        .await
        .unwrap();
}

#[tokio::test]
async fn should_supersede_previous_secret_on_re_registration() {
    let h = Harness::new();
    let old = h.enroll("dev-1", SCENARIO_SECRET).await;
    let old_code = h.code_at(&old, T0);

    let registration = h
        .register_usecase()
        .execute(register_input("dev-1"))
        .await
        .unwrap();
    let new_code = h.code_at(&registration.secret, T0);
    let uc = h.verify_usecase();

    if old_code != new_code {
        let result = uc.execute(verify_input("dev-1", &old_code)).await;
        assert!(
            matches!(result, Err(OtpServiceError::InvalidCode)),
            "expected InvalidCode for superseded secret, got {result:?}"
        );
    }
    uc.execute(verify_input("dev-1", &new_code)).await.unwrap();
}

#[tokio::test]
async fn should_reject_blank_device_id_on_registration() {
    let h = Harness::new();
    let result = h.register_usecase().execute(register_input("")).await;
    assert!(
        matches!(result, Err(OtpServiceError::InvalidIdentity)),
        "expected InvalidIdentity, got {result:?}"
    );
    assert!(h.store.is_empty().unwrap());
}
