//! `seatlink`: command-line client for the library seat check-in service.

mod clipboard;
mod prompt;
mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use seatlink_models::{FeedbackMessage, CONFIG_FEEDBACK_LIFETIME};
use seatlink_sdk::{
    AuthSession, AutoCheckinToggle, BeaconInputs, CheckinButton, ClientConfig, ConfigReconciler,
    ControlOutcome, CredentialStore, FileCredentialStore, Gateway, HttpGateway, PollState,
    SdkError, SessionAcquisition, StatusPoller, StatusSnapshot, ToggleState,
};
use tracing::{debug, warn};

use crate::clipboard::SystemClipboard;

/// Library seat check-in client.
#[derive(Parser, Debug)]
#[command(name = "seatlink", about = "Library seat check-in client", version)]
struct Cli {
    /// REST base URL (overrides `SEATLINK_API_URL`).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Credential file (overrides `SEATLINK_CREDENTIAL_FILE`).
    #[arg(long, global = true)]
    credential_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the credential.
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Create an account. Does not log in.
    Register {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Forget the stored credential.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Show the current check-in status.
    Status,
    /// Bind a session from a pasted link; reads the clipboard when TEXT is omitted.
    Bind {
        text: Option<String>,
        #[command(flatten)]
        beacon: BeaconArgs,
    },
    /// Save beacon parameters, keeping the bound session.
    Params {
        #[command(flatten)]
        beacon: BeaconArgs,
    },
    /// Check in now.
    Checkin,
    /// Switch the server-side auto check-in.
    Auto {
        #[arg(value_enum)]
        action: AutoAction,
    },
    /// Ask the server to re-validate the bound session.
    Keepalive,
    /// Follow the status until interrupted.
    Watch {
        /// Poll interval in seconds (overrides `SEATLINK_POLL_INTERVAL_SECS`).
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Administrator commands.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Args, Debug)]
struct BeaconArgs {
    /// Beacon major; omitted keeps the current value.
    #[arg(long)]
    major: Option<String>,
    /// Beacon minor; omitted keeps the current value.
    #[arg(long)]
    minor: Option<String>,
}

impl BeaconArgs {
    fn inputs(&self) -> BeaconInputs {
        BeaconInputs::new(
            self.major.clone().unwrap_or_default(),
            self.minor.clone().unwrap_or_default(),
        )
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum AutoAction {
    On,
    Off,
    Toggle,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// List all users.
    Users,
    /// Delete a user.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Force a check-in for a user.
    Checkin { id: i64 },
}

struct App {
    config: ClientConfig,
    auth: AuthSession,
    gateway: Arc<dyn Gateway>,
}

impl App {
    fn new(cli: &Cli) -> Result<Self> {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &cli.api_url {
            config.api_url.clone_from(url);
        }
        if let Some(path) = &cli.credential_file {
            config.credential_file = Some(path.clone());
        }

        let path = config
            .credential_path()
            .context("no config directory available; pass --credential-file")?;
        debug!(api = %config.api_url, credential = %path.display(), "client configured");

        let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(path));
        let gateway: Arc<dyn Gateway> = Arc::new(HttpGateway::new(&config, Arc::clone(&store))?);
        let auth = AuthSession::new(store, Arc::clone(&gateway));
        Ok(Self {
            config,
            auth,
            gateway,
        })
    }

    async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Login { username } => self.login(username).await,
            Command::Register { username } => self.register(username).await,
            Command::Logout => {
                self.auth.logout()?;
                println!("Logged out");
                Ok(())
            }
            Command::Whoami => {
                self.require_login().await?;
                if let Some(profile) = self.auth.profile() {
                    println!("{}", render::profile(profile));
                }
                Ok(())
            }
            Command::Status => {
                self.require_login().await?;
                let snapshot = self.snapshot().await?;
                println!("{}", render::status(&snapshot));
                Ok(())
            }
            Command::Bind { text, beacon } => self.bind(text, &beacon).await,
            Command::Params { beacon } => self.params(&beacon).await,
            Command::Checkin => {
                self.require_login().await?;
                let outcome = CheckinButton::new()
                    .press(self.gateway.as_ref())
                    .await
                    .context("a check-in is already running")?;
                self.finish(outcome).await
            }
            Command::Auto { action } => self.auto(action).await,
            Command::Keepalive => {
                self.require_login().await?;
                let ack = self
                    .gateway
                    .keep_alive()
                    .await
                    .map_err(|e| self.fail(e))?;
                println!("{}", ack.message.as_deref().unwrap_or("Session is alive"));
                Ok(())
            }
            Command::Watch { interval } => self.watch(interval).await,
            Command::Admin { command } => self.admin(command).await,
        }
    }

    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    async fn login(&mut self, username: Option<String>) -> Result<()> {
        let username = prompt::username(username)?;
        let password = prompt::password(false)?;
        let profile = self
            .auth
            .login(&username, &password)
            .await
            .map_err(|e| anyhow!(e.user_message()))?;
        println!("Logged in as {}", render::profile(&profile));
        Ok(())
    }

    async fn register(&mut self, username: Option<String>) -> Result<()> {
        let username = prompt::username(username)?;
        let password = prompt::password(true)?;
        let profile = self
            .auth
            .register(&username, &password)
            .await
            .map_err(|e| anyhow!(e.user_message()))?;
        println!("Account {} created; run `seatlink login`", profile.username);
        Ok(())
    }

    async fn require_login(&mut self) -> Result<()> {
        self.auth.refresh().await?;
        if !self.auth.is_authenticated() {
            bail!("not logged in; run `seatlink login` first");
        }
        Ok(())
    }

    /// Turn an SDK error into the message shown to the user. A rejected
    /// credential logs the user out.
    fn fail(&mut self, err: SdkError) -> anyhow::Error {
        debug!(error = ?err, "command failed");
        if err.is_invalid_credential() {
            if let Err(e) = self.auth.logout() {
                warn!(error = %e, "could not remove the stored credential");
            }
            return anyhow!("login expired; run `seatlink login` again");
        }
        anyhow!(err.user_message())
    }

    async fn snapshot(&mut self) -> Result<StatusSnapshot> {
        self.gateway.status().await.map_err(|e| self.fail(e))
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    async fn bind(&mut self, text: Option<String>, beacon: &BeaconArgs) -> Result<()> {
        self.require_login().await?;
        let snapshot = self.snapshot().await?;
        let inputs = beacon.inputs();
        let mut acquisition = SessionAcquisition::new(Arc::clone(&self.gateway));

        let result = match text {
            Some(text) => {
                acquisition
                    .acquire_from_text(&text, &inputs, Some(&snapshot))
                    .await
            }
            None => match acquisition
                .acquire_from_clipboard(&SystemClipboard, &inputs, Some(&snapshot))
                .await
            {
                Err(SdkError::ClipboardUnavailable(reason)) if acquisition.manual_entry().visible => {
                    eprintln!("Cannot read the clipboard ({reason})");
                    acquisition.set_manual_text(prompt::manual_link()?);
                    acquisition
                        .submit_manual_input(&inputs, Some(&snapshot))
                        .await
                }
                other => other,
            },
        };

        let acquired = result.map_err(|e| self.fail(e))?;
        println!("{}", render::feedback(&acquired.feedback()));
        if acquired.refresh_status {
            let snapshot = self.snapshot().await?;
            println!("{}", render::status(&snapshot));
        }
        Ok(())
    }

    async fn params(&mut self, beacon: &BeaconArgs) -> Result<()> {
        self.require_login().await?;
        let snapshot = self.snapshot().await?;
        let update = ConfigReconciler
            .save_parameters(self.gateway.as_ref(), &beacon.inputs(), Some(&snapshot))
            .await
            .map_err(|e| self.fail(e))?;

        let msg = FeedbackMessage::success(
            format!(
                "Beacon saved: {}/{}",
                update.venue_major, update.venue_minor
            ),
            CONFIG_FEEDBACK_LIFETIME,
        );
        println!("{}", render::feedback(&msg));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Check-in
    // ------------------------------------------------------------------

    async fn auto(&mut self, action: AutoAction) -> Result<()> {
        self.require_login().await?;
        let snapshot = self.snapshot().await?;
        let toggle = AutoCheckinToggle::new(snapshot.auto_checkin_enabled().into());

        let already = matches!(
            (action, toggle.state()),
            (AutoAction::On, ToggleState::On) | (AutoAction::Off, ToggleState::Off)
        );
        if already {
            println!("Auto check-in is already {}", toggle.state());
            return Ok(());
        }

        let outcome = toggle
            .press(self.gateway.as_ref())
            .await
            .context("auto check-in change already in progress")?;
        self.finish(outcome).await
    }

    async fn finish(&mut self, outcome: ControlOutcome) -> Result<()> {
        if outcome.session_expired {
            return Err(self.fail(SdkError::InvalidCredential));
        }
        if !outcome.feedback.is_success() {
            bail!(outcome.feedback.text);
        }
        println!("{}", render::feedback(&outcome.feedback));
        if outcome.refresh_status {
            let snapshot = self.snapshot().await?;
            println!("{}", render::status(&snapshot));
        }
        Ok(())
    }

    async fn watch(&mut self, interval: Option<u64>) -> Result<()> {
        self.require_login().await?;
        let interval = interval
            .filter(|s| *s > 0)
            .map_or(self.config.poll_interval, Duration::from_secs);

        let poller = StatusPoller::spawn(
            Arc::clone(&self.gateway),
            interval,
            self.auth.session_token(),
        );
        let mut rx = poller.subscribe();
        let toggle = AutoCheckinToggle::new(ToggleState::Off);
        let mut seen = false;
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = rx.borrow_and_update().clone();
                    match state {
                        PollState::Ready(snapshot) => {
                            if let Some(now) = sync_toggle(&toggle, &snapshot, seen) {
                                println!("Auto check-in switched {now}");
                            }
                            seen = true;
                            println!("{}\n", render::status(&snapshot));
                        }
                        PollState::SessionExpired => {
                            return Err(self.fail(SdkError::InvalidCredential));
                        }
                        PollState::Idle | PollState::Loading(_) => {}
                    }
                }
            }
        }

        poller.join().await;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    async fn admin(&mut self, command: AdminCommand) -> Result<()> {
        self.require_login().await?;
        if !self.auth.profile().is_some_and(|p| p.is_admin) {
            bail!("this account is not an administrator");
        }

        match command {
            AdminCommand::Users => {
                let users = self
                    .gateway
                    .admin_users()
                    .await
                    .map_err(|e| self.fail(e))?;
                println!("{}", render::users(&users));
            }
            AdminCommand::Delete { id, yes } => {
                if !yes && !prompt::confirm(&format!("Delete user {id}?"))? {
                    return Ok(());
                }
                self.gateway
                    .admin_delete_user(id)
                    .await
                    .map_err(|e| self.fail(e))?;
                println!("User {id} deleted");
            }
            AdminCommand::Checkin { id } => {
                let report = self
                    .gateway
                    .admin_checkin(id)
                    .await
                    .map_err(|e| self.fail(e))?;
                let text = report
                    .message
                    .unwrap_or_else(|| format!("Check-in triggered for user {id}"));
                if report.success == Some(false) {
                    bail!(text);
                }
                println!("{text}");
            }
        }
        Ok(())
    }
}

/// Mirror the server's auto check-in flag onto `toggle`.
///
/// Returns the new state when it changed since an earlier snapshot.
fn sync_toggle(
    toggle: &AutoCheckinToggle,
    snapshot: &StatusSnapshot,
    seen: bool,
) -> Option<ToggleState> {
    let before = toggle.state();
    toggle.sync(snapshot.auto_checkin_enabled());
    let now = toggle.state();
    (seen && now != before).then_some(now)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable (RUST_LOG controls the level).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut app = App::new(&cli)?;
    app.run(cli.command).await
}
