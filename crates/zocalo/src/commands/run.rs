use zocalo_core::config;

/// Runs the shell until the bar window is closed.
///
/// Refuses to start when another instance already owns the shell mutex:
/// two bars fighting over the screen reservation and the native taskbar
/// would leave the desktop scrambled.
pub fn execute() {
    let _instance = match zocalo_windows::instance::acquire() {
        Ok(Some(instance)) => instance,
        Ok(None) => {
            eprintln!("Zocalo is already running.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: could not acquire the instance mutex: {e}");
            std::process::exit(1);
        }
    };

    let config = config::load();
    if let Err(e) = zocalo_windows::run(config) {
        eprintln!("Shell error: {e}");
        std::process::exit(1);
    }
}
