//! Login form state machine and submit flow.
//!
//! # Design
//! - Every submit press starts a fresh attempt: `idle -> validating -> submitting -> succeeded | failed`.
//! - Validation runs on submit; the API is never called while any field is invalid.
//! - A submitting form is disabled and refuses a second dispatch.
//! - Results are matched to their attempt and dropped when the view has unmounted.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::core::api::{ApiError, AuthApi};
use crate::core::cancel::CancelToken;
use crate::core::guard::{LANDING_PAGE, Navigation};
use crate::core::session::AuthSession;
use crate::core::validation::{ValidationError, validate_email, validate_password};
use crate::models::{LoginResponse, UserIdentity};

/// Lifecycle of one login attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginStatus {
    /// Waiting for a submit.
    #[default]
    Idle,
    /// Fields are being checked.
    ///
    /// Transient: [`LoginForm::submit`] enters and leaves it in one call, so no render observes it.
    Validating,
    /// Credentials were sent; the form is disabled.
    Submitting,
    /// Sign-in succeeded.
    Succeeded,
    /// Sign-in was rejected; the form is usable again.
    Failed,
}

/// Identifier of one submit press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(u64);

/// Per-field validation reasons from the latest submit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Email field reason.
    pub email: Option<ValidationError>,
    /// Password field reason.
    pub password: Option<ValidationError>,
}

impl FieldErrors {
    /// Validate both fields.
    #[must_use]
    pub fn check(email: &str, password: &str) -> Self {
        Self {
            email: validate_email(email).err(),
            password: validate_password(password).err(),
        }
    }

    /// Whether both fields passed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// State of the current attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginAttempt {
    id: AttemptId,
    status: LoginStatus,
    error_message: Option<String>,
}

impl LoginAttempt {
    /// Attempt identifier.
    #[must_use]
    pub const fn id(&self) -> AttemptId {
        self.id
    }

    /// Attempt status.
    #[must_use]
    pub const fn status(&self) -> LoginStatus {
        self.status
    }

    /// Failure message for a rejected attempt.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Credentials cleared for sending, tagged with their attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingLogin {
    /// Attempt the result must be matched against.
    pub attempt: AttemptId,
    /// Email to send.
    pub email: String,
    /// Password to send.
    pub password: String,
}

/// Result of pressing submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field failed validation; nothing was sent.
    Blocked(FieldErrors),
    /// An attempt is already in flight; the press is ignored.
    Busy,
    /// Send these credentials.
    Dispatch(PendingLogin),
}

/// Result of a finished attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted.
    SignedIn {
        /// Identity to store in the session.
        identity: UserIdentity,
        /// Where to go next.
        navigation: Navigation,
    },
    /// Credentials rejected.
    Failed {
        /// Message shown on the form.
        message: String,
    },
}

/// Login form: field values, validation errors, and the current attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    email: String,
    password: String,
    field_errors: FieldErrors,
    attempt: LoginAttempt,
    next_attempt: u64,
}

impl LoginForm {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current email value.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Current password value.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Validation reasons from the latest submit.
    #[must_use]
    pub const fn field_errors(&self) -> FieldErrors {
        self.field_errors
    }

    /// Current attempt.
    #[must_use]
    pub const fn attempt(&self) -> &LoginAttempt {
        &self.attempt
    }

    /// Current attempt status.
    #[must_use]
    pub const fn status(&self) -> LoginStatus {
        self.attempt.status
    }

    /// Failure message from the latest attempt.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.attempt.error_message()
    }

    /// Whether inputs and the submit control must be non-interactive.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self.attempt.status, LoginStatus::Submitting)
    }

    /// Update the email. Clears the email error; ignored while submitting.
    pub fn set_email(&mut self, value: impl Into<String>) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.email = value.into();
        self.field_errors.email = None;
        true
    }

    /// Update the password. Clears the password error; ignored while submitting.
    pub fn set_password(&mut self, value: impl Into<String>) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.password = value.into();
        self.field_errors.password = None;
        true
    }

    /// Start a new attempt: validate, then either block or hand out credentials to send.
    ///
    /// Passes through [`LoginStatus::Validating`] and returns with the form either back in
    /// [`LoginStatus::Idle`] or in [`LoginStatus::Submitting`].
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_disabled() {
            debug!("login submit ignored: attempt already in flight");
            return SubmitOutcome::Busy;
        }
        self.next_attempt += 1;
        self.attempt = LoginAttempt {
            id: AttemptId(self.next_attempt),
            status: LoginStatus::Validating,
            error_message: None,
        };

        debug!("login attempt {:?} validating", self.attempt.id);
        self.field_errors = FieldErrors::check(&self.email, &self.password);
        if !self.field_errors.is_empty() {
            debug!("login submit blocked by validation: {:?}", self.field_errors);
            self.attempt.status = LoginStatus::Idle;
            return SubmitOutcome::Blocked(self.field_errors);
        }

        self.attempt.status = LoginStatus::Submitting;
        SubmitOutcome::Dispatch(PendingLogin {
            attempt: self.attempt.id,
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    /// Apply the API result for `attempt`. Results for any other attempt are dropped.
    pub fn complete(
        &mut self,
        attempt: AttemptId,
        result: Result<UserIdentity, ApiError>,
        failure_fallback: &str,
    ) -> Option<LoginOutcome> {
        if attempt != self.attempt.id || self.attempt.status != LoginStatus::Submitting {
            debug!("stale login result for {attempt:?} dropped");
            return None;
        }
        match result {
            Ok(identity) => {
                self.attempt.status = LoginStatus::Succeeded;
                Some(LoginOutcome::SignedIn {
                    identity,
                    navigation: Navigation::replace(LANDING_PAGE),
                })
            }
            Err(err) => {
                let message = err.display_message(failure_fallback);
                self.attempt.status = LoginStatus::Failed;
                self.attempt.error_message = Some(message.clone());
                Some(LoginOutcome::Failed { message })
            }
        }
    }
}

/// Drives a [`LoginForm`] against the API and writes successes into the session.
pub struct LoginFlow<A: ?Sized> {
    api: Rc<A>,
    session: AuthSession,
    lifetime: CancelToken,
    failure_fallback: String,
}

impl<A: AuthApi + ?Sized> LoginFlow<A> {
    /// Flow bound to one mounted login view.
    pub fn new(
        api: Rc<A>,
        session: AuthSession,
        lifetime: CancelToken,
        failure_fallback: impl Into<String>,
    ) -> Self {
        Self {
            api,
            session,
            lifetime,
            failure_fallback: failure_fallback.into(),
        }
    }

    /// Press submit and, when validation passes, run the attempt to completion.
    pub async fn submit(&self, form: &RefCell<LoginForm>) -> Option<LoginOutcome> {
        let outcome = form.borrow_mut().submit();
        match outcome {
            SubmitOutcome::Dispatch(pending) => self.dispatch(pending, form).await,
            SubmitOutcome::Blocked(_) | SubmitOutcome::Busy => None,
        }
    }

    /// Send `pending` and apply the result, unless the view unmounted meanwhile.
    ///
    /// The issued token is adopted only when the result is applied, so a discarded or stale
    /// attempt leaves no credentials behind.
    pub async fn dispatch(
        &self,
        pending: PendingLogin,
        form: &RefCell<LoginForm>,
    ) -> Option<LoginOutcome> {
        let response = self.api.login(&pending.email, &pending.password).await;
        if self.lifetime.is_cancelled() {
            warn!("login result discarded: view unmounted");
            return None;
        }
        let (token, result) = match response {
            Ok(LoginResponse { token, user }) => (Some(token), Ok(user)),
            Err(err) => (None, Err(err)),
        };
        let outcome = form
            .borrow_mut()
            .complete(pending.attempt, result, &self.failure_fallback)?;
        match &outcome {
            LoginOutcome::SignedIn { identity, .. } => {
                if let Some(token) = token {
                    self.api.adopt_token(token);
                }
                self.session.login(identity.clone());
            }
            LoginOutcome::Failed { message } => info!("login rejected: {message}"),
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::Page;
    use crate::models::Role;
    use async_trait::async_trait;
    use std::cell::Cell;
    use yewdux::Context;

    const FALLBACK: &str = "登入失敗，請稍後再試";

    #[derive(Default)]
    struct FakeAuthApi {
        calls: Cell<u32>,
        last: RefCell<Option<(String, String)>>,
        reply: RefCell<Option<Result<UserIdentity, ApiError>>>,
        adopted: RefCell<Option<String>>,
        unmount_during_call: Option<CancelToken>,
    }

    impl FakeAuthApi {
        fn replying(reply: Result<UserIdentity, ApiError>) -> Self {
            Self {
                reply: RefCell::new(Some(reply)),
                ..Self::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeAuthApi {
        async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
            self.calls.set(self.calls.get() + 1);
            *self.last.borrow_mut() = Some((email.to_string(), password.to_string()));
            if let Some(lifetime) = &self.unmount_during_call {
                lifetime.cancel();
            }
            let reply = self
                .reply
                .borrow()
                .clone()
                .unwrap_or_else(|| Err(ApiError::Transport("no reply scripted".to_string())))?;
            Ok(LoginResponse {
                token: format!("token-{}", reply.username),
                user: reply,
            })
        }

        fn adopt_token(&self, token: String) {
            *self.adopted.borrow_mut() = Some(token);
        }

        async fn current_user(&self) -> Result<Option<UserIdentity>, ApiError> {
            Ok(None)
        }
    }

    fn test_user() -> UserIdentity {
        UserIdentity {
            username: "TestUser".to_string(),
            role: Role::User,
        }
    }

    fn filled(email: &str, password: &str) -> RefCell<LoginForm> {
        let mut form = LoginForm::new();
        form.set_email(email);
        form.set_password(password);
        RefCell::new(form)
    }

    fn build_flow(api: &Rc<FakeAuthApi>, session: &AuthSession) -> LoginFlow<FakeAuthApi> {
        LoginFlow::new(Rc::clone(api), session.clone(), CancelToken::new(), FALLBACK)
    }

    #[test]
    fn invalid_email_blocks_submit() {
        let mut form = LoginForm::new();
        form.set_email("invalid-email");
        form.set_password("password123");
        let outcome = form.submit();
        assert_eq!(
            outcome,
            SubmitOutcome::Blocked(FieldErrors {
                email: Some(ValidationError::InvalidFormat),
                password: None,
            })
        );
        assert_eq!(form.status(), LoginStatus::Idle);
        assert!(!form.is_disabled());
    }

    #[test]
    fn empty_form_reports_both_fields() {
        let mut form = LoginForm::new();
        let SubmitOutcome::Blocked(errors) = form.submit() else {
            panic!("empty form must be blocked");
        };
        assert_eq!(errors.email, Some(ValidationError::InvalidFormat));
        assert_eq!(errors.password, Some(ValidationError::TooShort));
    }

    #[test]
    fn resubmit_replaces_error_set() {
        let mut form = LoginForm::new();
        form.set_email("invalid");
        form.set_password("12345678");
        form.submit();
        assert_eq!(
            form.field_errors().password,
            Some(ValidationError::MissingLetterOrDigit)
        );

        form.set_email("test@example.com");
        assert_eq!(form.field_errors().email, None);
        form.set_password("password123");
        assert!(matches!(form.submit(), SubmitOutcome::Dispatch(_)));
        assert!(form.field_errors().is_empty());
    }

    #[test]
    fn editing_clears_only_that_field() {
        let mut form = LoginForm::new();
        form.set_email("invalid");
        form.set_password("1234567");
        form.submit();
        form.set_password("12345678");
        assert_eq!(form.field_errors().password, None);
        assert_eq!(
            form.field_errors().email,
            Some(ValidationError::InvalidFormat)
        );
    }

    #[test]
    fn submitting_form_is_locked() {
        let form = filled("user@example.com", "password123");
        let first = form.borrow_mut().submit();
        assert!(matches!(first, SubmitOutcome::Dispatch(_)));
        assert!(form.borrow().is_disabled());
        assert_eq!(form.borrow_mut().submit(), SubmitOutcome::Busy);
        assert!(!form.borrow_mut().set_email("other@example.com"));
        assert_eq!(form.borrow().email(), "user@example.com");
    }

    #[test]
    fn results_for_older_attempts_are_dropped() {
        let mut form = filled("user@example.com", "password123").into_inner();
        let SubmitOutcome::Dispatch(first) = form.submit() else {
            panic!("valid form must dispatch");
        };
        let failed = form.complete(first.attempt, Err(ApiError::rejected(401, "bad")), FALLBACK);
        assert!(matches!(failed, Some(LoginOutcome::Failed { .. })));

        let SubmitOutcome::Dispatch(second) = form.submit() else {
            panic!("valid form must dispatch");
        };
        assert_ne!(first.attempt, second.attempt);
        assert_eq!(form.error_message(), None);
        assert_eq!(form.complete(first.attempt, Ok(test_user()), FALLBACK), None);
        assert_eq!(form.status(), LoginStatus::Submitting);
        assert_eq!(
            form.complete(second.attempt, Ok(test_user()), FALLBACK),
            Some(LoginOutcome::SignedIn {
                identity: test_user(),
                navigation: Navigation::replace(Page::Dashboard),
            })
        );
        assert_eq!(form.complete(second.attempt, Ok(test_user()), FALLBACK), None);
    }

    #[tokio::test]
    async fn invalid_fields_never_call_the_api() {
        let api = Rc::new(FakeAuthApi::replying(Ok(test_user())));
        let session = AuthSession::new(&Context::new());
        let flow = build_flow(&api, &session);
        for (email, password) in [
            ("", ""),
            ("invalid-email", "password123"),
            ("user@example.com", "1234567"),
            ("user@example.com", "12345678"),
        ] {
            let form = filled(email, password);
            assert_eq!(flow.submit(&form).await, None);
        }
        assert_eq!(api.calls.get(), 0);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn success_signs_in_and_replaces_history() {
        let api = Rc::new(FakeAuthApi::replying(Ok(test_user())));
        let session = AuthSession::new(&Context::new());
        let form = filled("user@example.com", "password123");

        let outcome = build_flow(&api, &session).submit(&form).await;

        assert_eq!(
            *api.last.borrow(),
            Some(("user@example.com".to_string(), "password123".to_string()))
        );
        assert_eq!(api.calls.get(), 1);
        assert_eq!(session.user(), Some(test_user()));
        assert_eq!(
            outcome,
            Some(LoginOutcome::SignedIn {
                identity: test_user(),
                navigation: Navigation {
                    to: Page::Dashboard,
                    replace: true,
                },
            })
        );
        assert_eq!(form.borrow().status(), LoginStatus::Succeeded);
        assert_eq!(api.adopted.borrow().as_deref(), Some("token-TestUser"));
    }

    #[tokio::test]
    async fn rejection_shows_server_message_and_reenables_form() {
        let api = Rc::new(FakeAuthApi::replying(Err(ApiError::rejected(
            401,
            "帳號或密碼錯誤",
        ))));
        let session = AuthSession::new(&Context::new());
        let form = filled("user@example.com", "password123");

        let outcome = build_flow(&api, &session).submit(&form).await;

        assert_eq!(
            outcome,
            Some(LoginOutcome::Failed {
                message: "帳號或密碼錯誤".to_string()
            })
        );
        let form = form.borrow();
        assert_eq!(form.status(), LoginStatus::Failed);
        assert_eq!(form.error_message(), Some("帳號或密碼錯誤"));
        assert!(!form.is_disabled());
        assert_eq!(form.email(), "user@example.com");
        assert_eq!(form.password(), "password123");
        assert_eq!(session.user(), None);
        assert_eq!(session.auth_expired_message(), None);
        assert_eq!(*api.adopted.borrow(), None);
    }

    #[tokio::test]
    async fn rejection_without_message_uses_fallback() {
        let api = Rc::new(FakeAuthApi::replying(Err(ApiError::Transport(
            "offline".to_string(),
        ))));
        let session = AuthSession::new(&Context::new());
        let form = filled("user@example.com", "password123");
        build_flow(&api, &session).submit(&form).await;
        assert_eq!(form.borrow().error_message(), Some(FALLBACK));
    }

    #[tokio::test]
    async fn unmount_while_pending_discards_result_and_token() {
        let lifetime = CancelToken::new();
        let api = Rc::new(FakeAuthApi {
            unmount_during_call: Some(lifetime.clone()),
            ..FakeAuthApi::replying(Ok(test_user()))
        });
        let session = AuthSession::new(&Context::new());
        let flow = LoginFlow::new(Rc::clone(&api), session.clone(), lifetime, FALLBACK);
        let form = filled("user@example.com", "password123");

        assert_eq!(flow.submit(&form).await, None);
        assert_eq!(api.calls.get(), 1);
        assert!(!session.is_authenticated());
        assert_eq!(*api.adopted.borrow(), None);
        assert_eq!(form.borrow().status(), LoginStatus::Submitting);
    }

    #[tokio::test]
    async fn stale_attempt_adopts_no_token() {
        let api = Rc::new(FakeAuthApi::replying(Ok(test_user())));
        let session = AuthSession::new(&Context::new());
        let flow = build_flow(&api, &session);
        let form = filled("user@example.com", "password123");
        let SubmitOutcome::Dispatch(first) = form.borrow_mut().submit() else {
            panic!("valid form must dispatch");
        };
        let rejected = form.borrow_mut().complete(
            first.attempt,
            Err(ApiError::rejected(401, "bad")),
            FALLBACK,
        );
        assert!(matches!(rejected, Some(LoginOutcome::Failed { .. })));
        let SubmitOutcome::Dispatch(_second) = form.borrow_mut().submit() else {
            panic!("valid form must dispatch");
        };

        assert_eq!(flow.dispatch(first, &form).await, None);
        assert_eq!(*api.adopted.borrow(), None);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn retry_after_failure_starts_fresh_attempt() {
        let api = Rc::new(FakeAuthApi::replying(Err(ApiError::rejected(401, "帳號或密碼錯誤"))));
        let session = AuthSession::new(&Context::new());
        let flow = build_flow(&api, &session);
        let form = filled("user@example.com", "password123");
        flow.submit(&form).await;
        assert_eq!(form.borrow().error_message(), Some("帳號或密碼錯誤"));

        *api.reply.borrow_mut() = Some(Ok(test_user()));
        let outcome = flow.submit(&form).await;
        assert!(matches!(outcome, Some(LoginOutcome::SignedIn { .. })));
        assert_eq!(form.borrow().error_message(), None);
        assert_eq!(api.calls.get(), 2);
        assert!(session.is_authenticated());
    }
}
