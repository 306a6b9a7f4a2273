pub mod cinema;
pub mod member;
pub mod movie;
pub mod page;
pub mod reservation;
pub mod review;
pub mod schedule;
pub mod seat;

pub use cinema::{Cinema, Screen, SeatGrade};
pub use member::{GuestDetails, GuestSummary, Member, PointHistory, PointType};
pub use movie::{Movie, MovieListing, ScreeningStatus};
pub use page::Page;
pub use reservation::{
    CreateReservationRequest, CreateReservationResponse, PaymentMethod, PaymentRequest,
    PaymentResponse, PaymentStatus, Reservation, TicketIssuanceStatus, UnpaidReservations,
};
pub use review::Review;
pub use schedule::{Schedule, ScheduleList, ScreeningDates};
pub use seat::{ScheduleSeats, SeatDto};

/// Сервер не всегда последователен в типах: идентификаторы приходят то числом,
/// то строкой, цены то целыми, то дробными, время то с `T`, то с пробелом.
pub(crate) mod lenient {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Int(i64),
        Float(f64),
        Str(String),
    }

    impl Scalar {
        fn into_string(self) -> String {
            match self {
                Scalar::Int(n) => n.to_string(),
                Scalar::Float(f) => f.to_string(),
                Scalar::Str(s) => s,
            }
        }

        fn into_i64<E: Error>(self) -> Result<i64, E> {
            match self {
                Scalar::Int(n) => Ok(n),
                Scalar::Float(f) => Ok(f.round() as i64),
                Scalar::Str(s) => s
                    .trim()
                    .parse()
                    .map_err(|_| E::custom(format!("expected an integer, got {s:?}"))),
            }
        }
    }

    const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
        TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Scalar::deserialize(d).map(Scalar::into_string)
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Scalar>::deserialize(d)?.map(Scalar::into_string))
    }

    pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Scalar::deserialize(d)?.into_i64()
    }

    pub fn opt_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Option::<Scalar>::deserialize(d)?
            .map(Scalar::into_i64)
            .transpose()
    }

    pub fn opt_timestamp<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("unrecognised timestamp {raw:?}"))),
        }
    }
}
