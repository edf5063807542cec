use crate::console::{Console, Level};
use crate::models::Platform;
use crate::services::locator::Locator;
use crate::services::patcher::{PatchOutcome, Patcher};

/// How a patch run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Patched,
    AlreadyPatched,
    /// Steam or the game could not be found
    NotDetected,
    /// The platform cannot be patched
    Unsupported,
    /// Reading or writing a marker file failed
    Failed,
}

/// Locates the game and patches it.
///
/// Every failure is reported on the console; nothing here aborts the process.
pub fn run(locator: &Locator, platform: &Platform, console: &Console) -> RunOutcome {
    console.info("checking if CS:GO needs patch...");

    let Some(install_dir) = locator.resolve(console) else {
        if !platform.is_supported() {
            return RunOutcome::Unsupported;
        }

        console.report(Level::Error, "CS:GO not detected");
        console.report(Level::Error, "└─ try enabling csgo_legacy beta");
        console.error("aborting...");
        return RunOutcome::NotDetected;
    };

    console.info(format!("CS:GO installation detected at '{install_dir}'"));

    match Patcher::new(&install_dir).apply(console) {
        Ok(PatchOutcome::Patched) => RunOutcome::Patched,
        Ok(PatchOutcome::AlreadyPatched) => RunOutcome::AlreadyPatched,
        Err(err) => {
            tracing::error!("Patch failed: {:?}", err);
            console.report(Level::Error, format!("failed to patch CS:GO: '{err}'"));
            RunOutcome::Failed
        }
    }
}
