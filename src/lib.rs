pub mod checks;
pub mod dates;
pub mod fetch;
pub mod holidays;
pub mod input;
pub mod output;
pub mod record;
