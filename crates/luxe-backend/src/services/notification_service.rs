use luxe_bridge::notification::NotificationId;

/// Handles a dismissal (see
/// [`luxe_bridge::MessageToBackend::DismissNotification`]).
pub fn handle_dismiss(context: super::AppContextHandle, id: NotificationId) {
    context.toaster.remove(id);
}

/// Handles a click on a notification's action button (see
/// [`luxe_bridge::MessageToBackend::InvokeNotificationAction`]).
pub fn handle_action(context: super::AppContextHandle, id: NotificationId) {
    if !context.toaster.invoke_action(id) {
        log::debug!("Notification {id} has no action to run");
    }
}

pub fn handle_clear(context: super::AppContextHandle) {
    context.toaster.clear_all();
}
