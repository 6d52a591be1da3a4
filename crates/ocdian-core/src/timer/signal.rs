/// Fire-and-forget notification raised when a breathing exercise finishes.
///
/// On a phone this is a haptic tap; the CLI rings the terminal bell.
pub trait CompletionSignal {
    fn signal(&self);
}

impl<F: Fn()> CompletionSignal for F {
    fn signal(&self) {
        self()
    }
}
