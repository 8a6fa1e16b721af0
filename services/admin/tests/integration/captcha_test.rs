use banquet_admin::domain::types::{
    CAPTCHA_MAX_ATTEMPTS, CaptchaScope, TEST_MODE_CODE, captcha_key,
};
use banquet_admin::error::AdminServiceError;
use banquet_admin::usecase::captcha::CaptchaIssuer;
use banquet_domain::captcha::{Channel, Scene};

use crate::helpers::{MemoryCaptchaCache, RecordingNotifier};

const PHONE: &str = "13800000000";

fn issuer(
    cache: &MemoryCaptchaCache,
    notifier: &RecordingNotifier,
    test_mode: bool,
) -> CaptchaIssuer<MemoryCaptchaCache, RecordingNotifier> {
    CaptchaIssuer {
        cache: cache.clone(),
        notifier: notifier.clone(),
        scope: CaptchaScope {
            app: "admin".to_owned(),
            scene: Scene::Login,
            channel: Channel::Sms,
        },
        test_mode,
    }
}

#[tokio::test]
async fn should_store_and_deliver_six_digit_code() {
    let cache = MemoryCaptchaCache::default();
    let notifier = RecordingNotifier::default();

    let issued = issuer(&cache, &notifier, false).send(PHONE).await.unwrap();

    let sent = notifier.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].receiver, PHONE);
    assert_eq!(sent[0].scene, Scene::Login);
    assert_eq!(sent[0].code.len(), 6);
    assert!(sent[0].code.bytes().all(|b| b.is_ascii_digit()));

    let key = captcha_key("admin", Scene::Login, Channel::Sms, PHONE);
    assert_eq!(key, "CAPTCHA:admin:login:sms:13800000000");
    assert_eq!(cache.stored(&key), Some(sent[0].code.clone()));
    assert!(issued.expire_at > chrono::Utc::now());
}

#[tokio::test]
async fn should_consume_code_on_first_match_only() {
    let cache = MemoryCaptchaCache::default();
    let notifier = RecordingNotifier::default();
    let issuer = issuer(&cache, &notifier, false);

    issuer.send(PHONE).await.unwrap();
    let code = notifier.last_code().unwrap();

    assert!(issuer.verify(PHONE, &code).await.unwrap());
    assert!(
        !issuer.verify(PHONE, &code).await.unwrap(),
        "a code must not verify twice"
    );
}

#[tokio::test]
async fn should_keep_code_after_mismatch() {
    let cache = MemoryCaptchaCache::default();
    let notifier = RecordingNotifier::default();
    let issuer = issuer(&cache, &notifier, false);

    issuer.send(PHONE).await.unwrap();
    let code = notifier.last_code().unwrap();
    let wrong = if code == "999999" { "000001" } else { "999999" };

    assert!(!issuer.verify(PHONE, wrong).await.unwrap());
    assert!(!issuer.verify(PHONE, "12ab").await.unwrap());
    assert!(issuer.verify(PHONE, &code).await.unwrap());
}

#[tokio::test]
async fn should_discard_code_after_too_many_wrong_guesses() {
    let cache = MemoryCaptchaCache::default();
    let notifier = RecordingNotifier::default();
    let issuer = issuer(&cache, &notifier, false);

    issuer.send(PHONE).await.unwrap();
    let code = notifier.last_code().unwrap();
    let wrong = if code == "999999" { "000001" } else { "999999" };

    for _ in 0..CAPTCHA_MAX_ATTEMPTS {
        assert!(!issuer.verify(PHONE, wrong).await.unwrap());
    }
    let key = captcha_key("admin", Scene::Login, Channel::Sms, PHONE);
    assert_eq!(cache.stored(&key), None);
    assert!(
        !issuer.verify(PHONE, &code).await.unwrap(),
        "the right code must not verify once it was guessed at too often"
    );
}

#[tokio::test]
async fn should_reset_wrong_guess_count_on_resend() {
    let cache = MemoryCaptchaCache::default();
    let notifier = RecordingNotifier::default();
    let issuer = issuer(&cache, &notifier, false);

    issuer.send(PHONE).await.unwrap();
    for _ in 1..CAPTCHA_MAX_ATTEMPTS {
        let code = notifier.last_code().unwrap();
        let wrong = if code == "999999" { "000001" } else { "999999" };
        assert!(!issuer.verify(PHONE, wrong).await.unwrap());
    }

    issuer.send(PHONE).await.unwrap();
    let code = notifier.last_code().unwrap();
    let wrong = if code == "999999" { "000001" } else { "999999" };
    assert!(!issuer.verify(PHONE, wrong).await.unwrap());
    assert!(issuer.verify(PHONE, &code).await.unwrap());
}

#[tokio::test]
async fn should_replace_earlier_code_on_resend() {
    let cache = MemoryCaptchaCache::default();
    let notifier = RecordingNotifier::default();
    let issuer = issuer(&cache, &notifier, false);

    issuer.send(PHONE).await.unwrap();
    issuer.send(PHONE).await.unwrap();

    let key = captcha_key("admin", Scene::Login, Channel::Sms, PHONE);
    assert_eq!(cache.stored(&key), notifier.last_code());
    assert_eq!(cache.codes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_issue_fixed_code_without_delivery_in_test_mode() {
    let cache = MemoryCaptchaCache::default();
    let notifier = RecordingNotifier::failing();
    let issuer = issuer(&cache, &notifier, true);

    issuer.send(PHONE).await.unwrap();

    assert!(notifier.sent.lock().unwrap().is_empty());
    assert!(issuer.verify(PHONE, TEST_MODE_CODE).await.unwrap());
}

#[tokio::test]
async fn should_discard_code_when_delivery_fails() {
    let cache = MemoryCaptchaCache::default();
    let notifier = RecordingNotifier::failing();

    let result = issuer(&cache, &notifier, false).send(PHONE).await;

    assert!(
        matches!(result, Err(AdminServiceError::Internal(_))),
        "expected Internal, got {result:?}"
    );
    assert!(cache.codes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_empty_receiver() {
    let result = issuer(
        &MemoryCaptchaCache::default(),
        &RecordingNotifier::default(),
        false,
    )
    .send("  ")
    .await;
    assert!(
        matches!(result, Err(AdminServiceError::MissingData)),
        "expected MissingData, got {result:?}"
    );
}

#[tokio::test]
async fn should_clean_pending_code() {
    let cache = MemoryCaptchaCache::default();
    let notifier = RecordingNotifier::default();
    let issuer = issuer(&cache, &notifier, false);

    issuer.send(PHONE).await.unwrap();
    let code = notifier.last_code().unwrap();
    issuer.clean(PHONE).await.unwrap();

    assert!(!issuer.verify(PHONE, &code).await.unwrap());
}

#[tokio::test]
async fn should_keep_scenes_apart() {
    let cache = MemoryCaptchaCache::default();
    let notifier = RecordingNotifier::default();
    let login = issuer(&cache, &notifier, false);
    let reset = CaptchaIssuer {
        cache: cache.clone(),
        notifier: notifier.clone(),
        scope: CaptchaScope {
            app: "admin".to_owned(),
            scene: Scene::ResetPassword,
            channel: Channel::Sms,
        },
        test_mode: false,
    };

    login.send(PHONE).await.unwrap();
    let code = notifier.last_code().unwrap();

    assert!(!reset.verify(PHONE, &code).await.unwrap());
    assert!(login.verify(PHONE, &code).await.unwrap());
}
