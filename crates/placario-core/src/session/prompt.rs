//! Presentation contract of the pre-expiry warning dialog.

/// The warning dialog's action surface: exactly two no-argument actions.
///
/// The prompt owns no timer and no session state -- it is purely reactive.
/// Whether and when it is shown belongs to the caller (the authentication
/// context decides, the front-end mounts). A failed renew is surfaced by
/// the collaborator; `renew` stays invocable after a failed attempt.
pub struct WarningPrompt<R, D>
where
    R: FnMut(),
    D: FnMut(),
{
    on_renew: R,
    on_dismiss: D,
}

impl<R, D> WarningPrompt<R, D>
where
    R: FnMut(),
    D: FnMut(),
{
    pub fn new(on_renew: R, on_dismiss: D) -> Self {
        Self {
            on_renew,
            on_dismiss,
        }
    }

    /// User chose to renew the session.
    pub fn renew(&mut self) {
        (self.on_renew)();
    }

    /// User dismissed the warning. Never triggers a renewal.
    pub fn dismiss(&mut self) {
        (self.on_dismiss)();
    }
}
