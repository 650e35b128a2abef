/// Upcoming IPOs from the [Benzinga calendar](https://www.benzinga.com/calendars/ipos).
pub mod ipo;
