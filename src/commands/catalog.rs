use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;

use cinema_client::models::{Movie, Page, Review, Schedule};
use cinema_client::AppContext;

use super::{or_dash, parse_date_arg, Output};

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List movies page by page
    Movies {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
    },

    /// Show one movie with its details
    Movie { id: i64 },

    /// Search movies by title keyword
    Search { keyword: String },

    /// Show reviews of a movie (5 per page)
    Reviews {
        movie_id: i64,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// List cinemas
    Cinemas,

    /// Show a cinema, its current movies, or a movie's schedules there
    Cinema {
        id: String,
        /// Show schedules of this movie
        #[arg(long, requires = "date")]
        movie: Option<i64>,
        /// Screening date (YYYYMMDD)
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
}

pub async fn run(ctx: &mut AppContext, cmd: CatalogCommand, out: Output) -> Result<()> {
    let client = &ctx.client;
    match cmd {
        CatalogCommand::Movies { page, size } => {
            let movies = client.list_movies(page, size).await?;
            out.emit(&movies, print_movie_page)
        }
        CatalogCommand::Movie { id } => {
            let movie = client
                .movie(id)
                .await
                .with_context(|| format!("failed to load movie {id}"))?;
            out.emit(&movie, print_movie_details)
        }
        CatalogCommand::Search { keyword } => {
            let movies = client.search_movies(&keyword).await?;
            out.emit(&movies, |movies| {
                if movies.is_empty() {
                    println!("No movies match {keyword:?}");
                }
                movies.iter().for_each(print_movie_line);
            })
        }
        CatalogCommand::Reviews { movie_id, page } => {
            let reviews = client.movie_reviews(movie_id, page).await?;
            out.emit(&reviews, print_review_page)
        }
        CatalogCommand::Cinemas => {
            let cinemas = client.cinemas().await?;
            out.emit(&cinemas, |cinemas| {
                for cinema in cinemas {
                    println!(
                        "{:<8} {:<20} {:<12} {}",
                        cinema.id,
                        cinema.name,
                        or_dash(cinema.region_name.as_deref()),
                        cinema.location
                    );
                }
            })
        }
        CatalogCommand::Cinema { id, movie, date } => {
            let cinema = client.cinema(&id).await?;
            match (movie, date) {
                (Some(movie_id), Some(date)) => {
                    let schedules = client.cinema_schedules(&cinema, movie_id, date).await?;
                    out.emit(&schedules, |schedules| {
                        println!("{} - {}", cinema.name, date);
                        print_schedules(schedules);
                    })
                }
                _ => {
                    let movies = client.current_movies(&cinema.id).await?;
                    out.emit(&movies, |movies| {
                        println!("{} ({})", cinema.name, cinema.location);
                        movies.iter().for_each(print_movie_line);
                    })
                }
            }
        }
    }
}

fn print_movie_line(movie: &Movie) {
    println!(
        "{:>5}  {:<30} {:<10} {:<9} {}",
        movie.id,
        movie.title,
        movie.genre,
        movie.screening_status.label(),
        movie.runtime.map(|r| format!("{r} min")).unwrap_or_default()
    );
}

fn print_movie_page(page: &Page<Movie>) {
    page.content.iter().for_each(print_movie_line);
    println!(
        "-- page {}/{} ({} movies)",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    );
}

fn print_movie_details(movie: &Movie) {
    println!("{} [{}]", movie.title, movie.screening_status.label());
    println!("  genre:       {}", movie.genre);
    println!("  released:    {}", or_dash(movie.release_date.as_deref()));
    if let Some(runtime) = movie.runtime {
        println!("  runtime:     {runtime} min");
    }
    println!("  rating:      {}", movie.viewing_grade_label());
    println!("  director:    {}", or_dash(movie.director_name.as_deref()));
    println!("  cast:        {}", or_dash(movie.actor_name.as_deref()));
    println!("  distributor: {}", or_dash(movie.distributor_name.as_deref()));
    if let Some(description) = movie.description.as_deref() {
        println!();
        println!("{description}");
    }
}

fn print_review_page(page: &Page<Review>) {
    if page.content.is_empty() {
        println!("No reviews yet");
        return;
    }
    for review in &page.content {
        let stars = "*".repeat(review.rating_value.clamp(0, 5) as usize);
        println!(
            "#{:<5} {:<5} {:<12} {}",
            review.id,
            stars,
            or_dash(review.member_user_id.as_deref()),
            review.content
        );
    }
    println!("-- page {}/{}", page.number + 1, page.total_pages.max(1));
}

pub(super) fn print_schedules(schedules: &[Schedule]) {
    if schedules.is_empty() {
        println!("No schedules");
    }
    for schedule in schedules {
        println!(
            "{:>6}  {}  {:<16} {:<10} {}",
            schedule.id,
            schedule.start_label(),
            schedule.cinema_name,
            schedule.screen_name,
            schedule.movie_title
        );
    }
}
