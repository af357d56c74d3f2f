use crate::app::AppContext;
use crate::error::Result;
use crate::version::VersionStatus;

pub async fn run_version_command(ctx: &AppContext) -> Result<()> {
    let info = ctx.update_checker()?.check().await;

    println!(
        "Installed version: {}",
        info.local.as_deref().unwrap_or("not installed")
    );
    println!(
        "Latest release:    {}",
        info.remote.as_deref().unwrap_or("unknown")
    );

    match info.status {
        VersionStatus::UpToDate => println!("✅ EmptyStandbyList is up to date."),
        VersionStatus::NotInstalled => println!("EmptyStandbyList is not installed."),
        VersionStatus::Outdated => println!("⬆️  A newer version is available."),
        VersionStatus::CheckFailed => println!(
            "⚠️  Could not check for updates: {}",
            info.error.as_deref().unwrap_or("no release information")
        ),
    }

    if !info.status.is_up_to_date() {
        if let Some(url) = &info.release_url {
            println!("Release: {url}");
        }
        if let Some(notes) = &info.notes {
            println!("\nRelease notes:\n{notes}");
        }
    }
    Ok(())
}
