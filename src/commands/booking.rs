use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use serde::Serialize;

use cinema_client::flow::{upcoming_dates, PaymentChoice, ScheduleSelector, SeatMap, DATE_STRIP_DAYS};
use cinema_client::models::{PaymentMethod, Reservation};
use cinema_client::{AppContext, ReservationFlow};

use super::catalog::print_schedules;
use super::{money, or_dash, parse_date_arg, Output};

#[derive(Debug, Subcommand)]
pub enum BookingCommand {
    /// Screening dates of a movie, next to the 7-day date strip
    Dates { movie_id: i64 },

    /// Schedules of a movie on a date, optionally narrowed to a cinema and screen
    Schedules {
        movie_id: i64,
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,
        #[arg(long)]
        cinema: Option<String>,
        #[arg(long, requires = "cinema")]
        screen: Option<String>,
    },

    /// Seat map of a schedule
    Seats { schedule_id: i64 },

    /// Reserve a seat, optionally paying and issuing the ticket right away
    Reserve {
        movie_id: i64,
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,
        #[arg(long)]
        schedule: i64,
        /// Seat label, e.g. A6
        #[arg(long)]
        seat: String,
        /// Guest phone number (used when not logged in)
        #[arg(long)]
        phone: Option<String>,
        /// Pay immediately with card, bank or point
        #[arg(long)]
        pay: Option<PaymentMethod>,
        #[command(flatten)]
        payment: PaymentArgs,
        /// Issue the ticket after paying
        #[arg(long, requires = "pay")]
        issue: bool,
    },

    /// Show a reservation
    Reservation { id: String },

    /// Pay a pending reservation
    Pay {
        id: String,
        #[arg(long)]
        method: PaymentMethod,
        #[command(flatten)]
        payment: PaymentArgs,
    },

    /// Issue the ticket of a paid reservation
    Issue { id: String },

    /// Cancel a reservation that has not been issued
    Cancel { id: String },
}

#[derive(Debug, Clone, clap::Args)]
pub struct PaymentArgs {
    /// Points to spend
    #[arg(long)]
    points: Option<i64>,
    /// Discount code
    #[arg(long)]
    discount: Option<String>,
    /// Accept the payment terms
    #[arg(long)]
    agree: bool,
}

impl PaymentArgs {
    fn choice(&self, method: Option<PaymentMethod>) -> PaymentChoice {
        PaymentChoice {
            method,
            used_points: self.points,
            discount_code: self.discount.clone(),
            terms_accepted: self.agree,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DateStrip {
    movie_id: i64,
    dates: Vec<StripDay>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StripDay {
    date: NaiveDate,
    has_schedules: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeatRow {
    row: String,
    seats: Vec<SeatCell>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeatCell {
    id: i64,
    label: String,
    grade: String,
    price: Option<i64>,
    available: bool,
}

pub async fn run(ctx: &mut AppContext, cmd: BookingCommand, out: Output) -> Result<()> {
    let client = &ctx.client;
    match cmd {
        BookingCommand::Dates { movie_id } => {
            let offered = client.screening_dates(movie_id).await?.parsed();
            let strip = DateStrip {
                movie_id,
                dates: upcoming_dates(Local::now().date_naive(), DATE_STRIP_DAYS)
                    .into_iter()
                    .map(|date| StripDay { date, has_schedules: offered.contains(&date) })
                    .collect(),
            };
            out.emit(&strip, |strip| {
                for day in &strip.dates {
                    let mark = if day.has_schedules { "*" } else { " " };
                    println!("{mark} {}", day.date.format("%Y-%m-%d %a"));
                }
            })
        }
        BookingCommand::Schedules { movie_id, date, cinema, screen } => {
            let mut selector = ScheduleSelector::new(client.schedules_on(movie_id, date).await?);
            if let Some(cinema) = cinema.as_deref() {
                selector.choose_cinema(cinema);
            }
            let schedules: Vec<_> = match (selector.cinema(), screen.as_deref()) {
                (Some(cinema), Some(screen)) => {
                    selector.times(cinema, screen).into_iter().cloned().collect()
                }
                (Some(cinema), None) => selector
                    .schedules()
                    .iter()
                    .filter(|s| s.cinema_name == cinema)
                    .cloned()
                    .collect(),
                _ => selector.schedules().to_vec(),
            };
            out.emit(&schedules, |schedules| {
                if selector.cinema().is_none() && !selector.is_empty() {
                    println!("Cinemas: {}", selector.cinemas().join(", "));
                } else if let (Some(cinema), None) = (selector.cinema(), screen.as_deref()) {
                    println!("Screens: {}", selector.screens(cinema).join(", "));
                }
                print_schedules(schedules);
            })
        }
        BookingCommand::Seats { schedule_id } => {
            let map = SeatMap::from_response(&client.schedule_seats(schedule_id).await?);
            out.emit(&seat_rows(&map), |rows| {
                for row in rows {
                    let cells: Vec<String> = row
                        .seats
                        .iter()
                        .map(|s| if s.available { format!("{:<4}", s.label) } else { "--  ".into() })
                        .collect();
                    println!("{:<3} {}", row.row, cells.join(""));
                }
                println!("{} of {} seats free", map.available_count(), map.seats().len());
            })
        }
        BookingCommand::Reserve { movie_id, date, schedule, seat, phone, pay, payment, issue } => {
            let mut flow = ReservationFlow::new(movie_id);
            flow.choose_date(client, date).await?;
            if flow.schedules().is_empty() {
                bail!("movie {movie_id} has no schedules on {date}");
            }
            flow.choose_schedule(client, schedule).await?;
            if let Some(phone) = phone.as_deref() {
                flow.set_guest_phone(phone)?;
            }
            flow.toggle_seat(&seat)?;

            let created = flow.submit(client).await?;
            if let Some(method) = pay {
                flow.pay(client, &payment.choice(Some(method))).await?;
                if issue {
                    flow.issue(client).await?;
                }
            }
            report(&flow, &created.reservation_id, out)
        }
        BookingCommand::Reservation { id } => {
            let reservation = client.reservation(&id).await?;
            out.emit(&reservation, print_reservation)
        }
        BookingCommand::Pay { id, method, payment } => {
            let mut flow = ReservationFlow::resume(client.reservation(&id).await?);
            let response = flow.pay(client, &payment.choice(Some(method))).await?;
            out.emit(&response, |response| {
                println!("Paid reservation {id}");
                if let Some(price) = response.final_price {
                    println!("  charged: {}", money(price));
                }
                if let Some(earned) = response.earned_points.filter(|p| *p > 0) {
                    println!("  earned:  {earned} points");
                }
            })
        }
        BookingCommand::Issue { id } => {
            let mut flow = ReservationFlow::resume(client.reservation(&id).await?);
            flow.issue(client).await?;
            report(&flow, &id, out)
        }
        BookingCommand::Cancel { id } => {
            let mut flow = ReservationFlow::resume(client.reservation(&id).await?);
            flow.cancel(client).await?;
            out.done(&format!("Reservation {id} cancelled"))
        }
    }
}

fn seat_rows(map: &SeatMap) -> Vec<SeatRow> {
    map.rows()
        .into_iter()
        .map(|(row, seats)| SeatRow {
            row: row.to_string(),
            seats: seats
                .into_iter()
                .map(|s| SeatCell {
                    id: s.id,
                    label: s.label.clone(),
                    grade: s.grade_name.clone(),
                    price: s.price,
                    available: s.available,
                })
                .collect(),
        })
        .collect()
}

fn report(flow: &ReservationFlow, reservation_id: &str, out: Output) -> Result<()> {
    match flow.reservation() {
        Some(reservation) => out.emit(reservation, print_reservation),
        None => out.done(&format!("Reservation {reservation_id}: {}", flow.stage())),
    }
}

pub(super) fn print_reservation(reservation: &Reservation) {
    println!("Reservation {}", reservation.id);
    println!("  movie:    {}", or_dash(reservation.movie_title.as_deref()));
    println!(
        "  where:    {} / {}",
        or_dash(reservation.cinema_name.as_deref()),
        or_dash(reservation.screen_name.as_deref())
    );
    if let Some(start) = reservation.screening_start_time {
        println!("  starts:   {}", start.format("%Y-%m-%d %H:%M"));
    }
    println!(
        "  seat:     {} {}",
        or_dash(reservation.seat_label.as_deref()),
        or_dash(reservation.seat_grade_name.as_deref())
    );
    println!("  owner:    {}", reservation.owner());
    println!("  amount:   {}", money(reservation.amount_due()));
    println!("  paid:     {}", if reservation.is_paid() { "yes" } else { "no" });
    println!("  ticket:   {}", if reservation.is_issued() { "issued" } else { "not issued" });
}
