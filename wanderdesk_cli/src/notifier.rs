use wanderdesk_lib::{Notifier, Toast, ToastLevel};

/// Prints toasts to stderr so stdout stays parseable.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => eprintln!("ok: {}", toast.message),
            ToastLevel::Error => eprintln!("error: {}", toast.message),
        }
    }
}
