use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Subcommand};

use cinema_client::forms::{CinemaForm, MovieForm, ScheduleForm, ScreenForm, SeatForm};
use cinema_client::models::{Reservation, ScreeningStatus};
use cinema_client::AppContext;

use super::booking::print_reservation;
use super::catalog::print_schedules;
use super::{money, or_dash, parse_date_arg, Output};

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    #[command(subcommand)]
    Movie(MovieAction),
    #[command(subcommand)]
    Cinema(CinemaAction),
    #[command(subcommand)]
    Screen(ScreenAction),
    #[command(subcommand)]
    Seat(SeatAction),
    #[command(subcommand)]
    Schedule(ScheduleAction),

    /// List members
    Members,
    /// Show one member
    Member { id: String },
    /// List guests (reservations without an account)
    Guests,
    /// Show a guest's reservations
    Guest { phone: String },

    /// Unpaid reservations waiting for payment
    Unpaid,
    /// Cancel unpaid reservations older than the timeout
    CancelExpired {
        #[arg(long, default_value_t = 30)]
        timeout_minutes: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum MovieAction {
    Show { id: i64 },
    Add(MovieArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        movie: MovieArgs,
    },
    Delete { id: i64 },
}

#[derive(Debug, Clone, Args)]
pub struct MovieArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    genre: String,
    /// Release date (YYYYMMDD or YYYY-MM-DD)
    #[arg(long)]
    release_date: String,
    /// N (upcoming), D (showing) or Y (ended)
    #[arg(long, value_parser = parse_status)]
    status: ScreeningStatus,
    /// Running time in minutes
    #[arg(long)]
    runtime: i64,
    #[arg(long)]
    actor: Option<String>,
    #[arg(long)]
    director: Option<String>,
    #[arg(long)]
    distributor: Option<String>,
    #[arg(long)]
    viewing_grade: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image: Option<String>,
}

impl From<MovieArgs> for MovieForm {
    fn from(args: MovieArgs) -> Self {
        MovieForm {
            title: args.title,
            genre: args.genre,
            release_date: args.release_date,
            screening_status: args.status,
            runtime: args.runtime,
            actor_name: args.actor,
            director_name: args.director,
            distributor_name: args.distributor,
            viewing_grade: args.viewing_grade,
            description: args.description,
            image: args.image,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CinemaAction {
    List,
    Add(CinemaArgs),
    /// Update the cinema with code ID
    Edit(CinemaArgs),
    Delete { id: String },
}

#[derive(Debug, Clone, Args)]
pub struct CinemaArgs {
    /// Cinema code
    id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    location: String,
    #[arg(long)]
    region: String,
}

impl From<CinemaArgs> for CinemaForm {
    fn from(args: CinemaArgs) -> Self {
        CinemaForm {
            id: args.id,
            name: args.name,
            location: args.location,
            region_id: args.region,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ScreenAction {
    List {
        #[arg(long)]
        cinema: Option<String>,
    },
    Add(ScreenArgs),
    /// Update the screen with code ID
    Edit(ScreenArgs),
    Delete { id: String },
}

#[derive(Debug, Clone, Args)]
pub struct ScreenArgs {
    /// Screen code
    id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    cinema: String,
    #[arg(long)]
    total_seats: i64,
}

impl From<ScreenArgs> for ScreenForm {
    fn from(args: ScreenArgs) -> Self {
        ScreenForm {
            id: args.id,
            name: args.name,
            total_seats: args.total_seats,
            cinema_id: args.cinema,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum SeatAction {
    List {
        #[arg(long)]
        screen: Option<String>,
    },
    Add(SeatArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        seat: SeatArgs,
    },
    Delete { id: i64 },
}

#[derive(Debug, Clone, Args)]
pub struct SeatArgs {
    /// Grade code (A-D) or name (GENERAL, PREMIUM, COUPLE, VIP)
    #[arg(long)]
    grade: String,
    #[arg(long)]
    row: String,
    #[arg(long)]
    column: String,
    #[arg(long)]
    screen: String,
}

impl SeatArgs {
    fn form(self, id: Option<i64>) -> SeatForm {
        SeatForm {
            id,
            seat_grade_id: self.grade,
            row: self.row,
            column: self.column,
            screen_id: self.screen,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ScheduleAction {
    List,
    Add(ScheduleArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    Delete { id: i64 },
}

#[derive(Debug, Clone, Args)]
pub struct ScheduleArgs {
    #[arg(long)]
    movie: i64,
    #[arg(long)]
    screen: String,
    #[arg(long, value_parser = parse_date_arg)]
    date: NaiveDate,
    /// Start time (HH:MM)
    #[arg(long, value_parser = parse_time_arg)]
    start: NaiveTime,
    /// End time (HH:MM)
    #[arg(long, value_parser = parse_time_arg)]
    end: Option<NaiveTime>,
}

impl From<ScheduleArgs> for ScheduleForm {
    fn from(args: ScheduleArgs) -> Self {
        ScheduleForm {
            movie_id: args.movie,
            screen_id: args.screen,
            date: args.date,
            start: args.start,
            end: args.end,
        }
    }
}

fn parse_status(value: &str) -> Result<ScreeningStatus, String> {
    match value.trim().to_ascii_uppercase().as_str() {
        "N" | "UPCOMING" => Ok(ScreeningStatus::Upcoming),
        "D" | "SHOWING" => Ok(ScreeningStatus::Showing),
        "Y" | "ENDED" => Ok(ScreeningStatus::Ended),
        other => Err(format!("unknown screening status {other:?}")),
    }
}

fn parse_time_arg(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| format!("expected HH:MM, got {value:?}"))
}

pub async fn run(ctx: &mut AppContext, cmd: AdminCommand, out: Output) -> Result<()> {
    let client = &ctx.client;
    match cmd {
        AdminCommand::Movie(action) => match action {
            MovieAction::Show { id } => {
                let movie = client.admin_movie(id).await?;
                out.emit(&movie, |m| {
                    println!("{} [{}] {}", m.title, m.screening_status.code(), m.genre);
                })
            }
            MovieAction::Add(movie) => {
                client.create_movie(movie.into()).await?;
                out.done("Movie registered")
            }
            MovieAction::Edit { id, movie } => {
                client.update_movie(id, movie.into()).await?;
                out.done(&format!("Movie {id} updated"))
            }
            MovieAction::Delete { id } => {
                client.delete_movie(id).await?;
                out.done(&format!("Movie {id} deleted"))
            }
        },
        AdminCommand::Cinema(action) => match action {
            CinemaAction::List => {
                let cinemas = client.admin_cinemas().await?;
                out.emit(&cinemas, |cinemas| {
                    for c in cinemas {
                        println!(
                            "{:<8} {:<20} {:<10} screens: {}",
                            c.id,
                            c.name,
                            or_dash(c.region_id.as_deref()),
                            c.screen_count.unwrap_or(0)
                        );
                    }
                })
            }
            CinemaAction::Add(cinema) => {
                client.create_cinema(&cinema.into()).await?;
                out.done("Cinema added")
            }
            CinemaAction::Edit(cinema) => {
                let form: CinemaForm = cinema.into();
                client.update_cinema(&form.id, &form).await?;
                out.done(&format!("Cinema {} updated", form.id))
            }
            CinemaAction::Delete { id } => {
                client.delete_cinema(&id).await?;
                out.done(&format!("Cinema {id} deleted"))
            }
        },
        AdminCommand::Screen(action) => match action {
            ScreenAction::List { cinema } => {
                let screens = match cinema.as_deref() {
                    Some(cinema) => client.cinema_screens(cinema).await?,
                    None => client.screens().await?,
                };
                out.emit(&screens, |screens| {
                    for s in screens {
                        println!(
                            "{:<8} {:<12} {:<16} seats: {}",
                            s.id,
                            s.name,
                            or_dash(s.cinema_name.as_deref()),
                            s.total_seats.unwrap_or(0)
                        );
                    }
                })
            }
            ScreenAction::Add(screen) => {
                let form = ScreenForm::from(screen);
                client.create_screen(&form).await?;
                out.done(&format!("Screen {} added", form.id))
            }
            ScreenAction::Edit(screen) => {
                let form = ScreenForm::from(screen);
                client.update_screen(&form.id, &form).await?;
                out.done(&format!("Screen {} updated", form.id))
            }
            ScreenAction::Delete { id } => {
                client.delete_screen(&id).await?;
                out.done(&format!("Screen {id} deleted"))
            }
        },
        AdminCommand::Seat(action) => match action {
            SeatAction::List { screen } => {
                let seats = client.seats(screen.as_deref()).await?;
                out.emit(&seats, |seats| {
                    for s in seats {
                        println!(
                            "{:>6} {:<4} grade {:<2} {}",
                            s.id,
                            s.label(),
                            s.seat_grade_id,
                            or_dash(s.screen_name.as_deref())
                        );
                    }
                })
            }
            SeatAction::Add(seat) => {
                client.create_seat(seat.form(None)).await?;
                out.done("Seat added")
            }
            SeatAction::Edit { id, seat } => {
                client.update_seat(id, seat.form(Some(id))).await?;
                out.done(&format!("Seat {id} updated"))
            }
            SeatAction::Delete { id } => {
                client.delete_seat(id).await?;
                out.done(&format!("Seat {id} deleted"))
            }
        },
        AdminCommand::Schedule(action) => match action {
            ScheduleAction::List => {
                let schedules = client.admin_schedules().await?;
                out.emit(&schedules, |schedules| print_schedules(schedules))
            }
            ScheduleAction::Add(schedule) => {
                client.create_schedule(schedule.into()).await?;
                out.done("Schedule added")
            }
            ScheduleAction::Edit { id, schedule } => {
                client.update_schedule(id, schedule.into()).await?;
                out.done(&format!("Schedule {id} updated"))
            }
            ScheduleAction::Delete { id } => {
                client.delete_schedule(id).await?;
                out.done(&format!("Schedule {id} deleted"))
            }
        },
        AdminCommand::Members => {
            let members = client.members().await?;
            out.emit(&members, |members| {
                for m in members {
                    println!("{:<16} {:<28} {:<14} {:>8}", m.user_id, m.email, m.phone_number, m.point_balance());
                }
            })
        }
        AdminCommand::Member { id } => {
            let member = client.member(&id).await?;
            out.emit(&member, |m| {
                println!("{} <{}> {} points", m.user_id, m.email, m.point_balance());
            })
        }
        AdminCommand::Guests => {
            let guests = client.guests().await?;
            out.emit(&guests, |guests| {
                for g in guests {
                    println!("{:<14} {}", g.phone_number, g.reservation_count.unwrap_or(0));
                }
            })
        }
        AdminCommand::Guest { phone } => {
            let guest = client.guest(&phone).await?;
            out.emit(&guest, |g| {
                println!(
                    "{}: {} reservations ({} completed, {} cancelled)",
                    g.phone_number,
                    g.total_reservations,
                    g.completed_reservations,
                    g.cancelled_reservations
                );
                g.reservations.iter().for_each(print_reservation);
            })
        }
        AdminCommand::Unpaid => {
            let unpaid = client.unpaid_reservations().await?;
            out.emit(&unpaid, |unpaid| {
                println!(
                    "{} unpaid (checked {})",
                    unpaid.total_count.unwrap_or(unpaid.reservations.len() as u64),
                    or_dash(unpaid.check_time.as_deref())
                );
                unpaid.reservations.iter().for_each(print_unpaid_line);
            })
        }
        AdminCommand::CancelExpired { timeout_minutes } => {
            let result = client.cancel_expired_reservations(timeout_minutes).await?;
            out.emit(&result, |r| match (r.cancelled_count, r.message.as_deref()) {
                (Some(count), _) => println!("Cancelled {count} expired reservations"),
                (None, Some(message)) => println!("{message}"),
                (None, None) => println!("Expired reservations cancelled"),
            })
        }
    }
}

fn print_unpaid_line(reservation: &Reservation) {
    println!(
        "{:<12} {:<14} {:<20} {:>12} {}",
        reservation.id,
        reservation.owner(),
        or_dash(reservation.movie_title.as_deref()),
        money(reservation.amount_due()),
        reservation
            .reservation_time
            .map(|t| t.format("%m-%d %H:%M").to_string())
            .unwrap_or_default()
    );
}
