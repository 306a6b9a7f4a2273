use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;
use tracing::warn;

use cinema_client::forms::{format_birth_date, format_phone_number, LoginForm, ProfileForm, ReviewForm, SignupForm};
use cinema_client::session::inspect_token;
use cinema_client::AppContext;

use super::{or_dash, Output};

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Log in and remember the access token
    Login {
        user_id: String,
        #[arg(long)]
        password: String,
    },

    /// Register a new member
    Signup {
        user_id: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        password_confirm: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Birth date (YYYY-MM-DD or YYYYMMDD)
        #[arg(long)]
        birth_date: String,
    },

    /// Log out and forget the stored token
    Logout,

    /// Show who the stored token belongs to
    Whoami,

    /// Show the member profile
    Profile,

    /// Change profile fields; omitted fields keep their value
    UpdateProfile {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        birth_date: Option<String>,
        #[arg(long, requires = "password_confirm")]
        password: Option<String>,
        #[arg(long)]
        password_confirm: Option<String>,
    },

    /// Point history, newest first
    Points,

    /// Write, edit or delete your reviews
    #[command(subcommand)]
    Review(ReviewCommand),
}

#[derive(Debug, Subcommand)]
pub enum ReviewCommand {
    Add {
        movie_id: i64,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        content: String,
    },
    Edit {
        review_id: i64,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        content: String,
    },
    Delete { review_id: i64 },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Identity {
    subject: Option<String>,
    role: Option<String>,
    expires_at: Option<String>,
    expired: bool,
}

pub async fn run(ctx: &mut AppContext, cmd: AccountCommand, out: Output) -> Result<()> {
    match cmd {
        AccountCommand::Login { user_id, password } => {
            let token = ctx.client.login(&LoginForm { user_id, password }).await?;
            ctx.tokens
                .save(&token)
                .with_context(|| format!("failed to store token in {}", ctx.tokens.path().display()))?;
            out.done("Logged in")
        }
        AccountCommand::Signup { user_id, password, password_confirm, email, phone, birth_date } => {
            let form = SignupForm {
                user_id,
                password,
                password_confirm,
                email,
                phone_number: format_phone_number(&phone),
                birth_date: format_birth_date(&birth_date),
            };
            ctx.client.signup(form).await?;
            out.done("Signed up, you can log in now")
        }
        AccountCommand::Logout => {
            let result = ctx.client.logout().await;
            ctx.tokens.clear()?;
            if let Err(e) = result {
                warn!("Server-side logout failed: {}", e);
            }
            out.done("Logged out")
        }
        AccountCommand::Whoami => {
            let token = ctx.client.token().context("not logged in")?;
            let claims = inspect_token(token).context("stored token is not a readable JWT")?;
            let identity = Identity {
                subject: claims.sub.clone(),
                role: claims.auth.clone(),
                expires_at: claims.expires_at().map(|t| t.to_rfc3339()),
                expired: claims.is_expired_at(Utc::now()),
            };
            out.emit(&identity, |id| {
                println!("user:    {}", or_dash(id.subject.as_deref()));
                println!("role:    {}", or_dash(id.role.as_deref()));
                println!("expires: {}", or_dash(id.expires_at.as_deref()));
                if id.expired {
                    println!("token has expired, log in again");
                }
            })
        }
        AccountCommand::Profile => {
            let member = ctx.client.my_profile().await?;
            out.emit(&member, |m| {
                println!("user:   {}", m.user_id);
                println!("email:  {}", m.email);
                println!("phone:  {}", format_phone_number(&m.phone_number));
                println!("born:   {}", format_birth_date(&m.birth_date));
                println!("points: {}", m.point_balance());
            })
        }
        AccountCommand::UpdateProfile { email, phone, birth_date, password, password_confirm } => {
            let current = ctx.client.my_profile().await?;
            let form = ProfileForm {
                user_id: current.user_id,
                email: email.unwrap_or(current.email),
                phone_number: format_phone_number(&phone.unwrap_or(current.phone_number)),
                birth_date: format_birth_date(&birth_date.unwrap_or(current.birth_date)),
                password,
                password_confirm,
            };
            ctx.client.update_profile(form).await?;
            out.done("Profile updated")
        }
        AccountCommand::Points => {
            let history = ctx.client.my_points().await?;
            out.emit(&history, |history| {
                if history.is_empty() {
                    println!("No point history");
                }
                for entry in history {
                    println!(
                        "{}  {:>+8}  {}",
                        entry
                            .created_at
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_else(|| "-".repeat(16)),
                        entry.signed_amount(),
                        or_dash(entry.type_text.as_deref())
                    );
                }
            })
        }
        AccountCommand::Review(cmd) => match cmd {
            ReviewCommand::Add { movie_id, rating, content } => {
                let form = ReviewForm { rating_value: rating, content };
                ctx.client.add_review(movie_id, &form).await?;
                out.done("Review posted")
            }
            ReviewCommand::Edit { review_id, rating, content } => {
                let form = ReviewForm { rating_value: rating, content };
                ctx.client.update_review(review_id, &form).await?;
                out.done("Review updated")
            }
            ReviewCommand::Delete { review_id } => {
                ctx.client.delete_review(review_id).await?;
                out.done("Review deleted")
            }
        },
    }
}
