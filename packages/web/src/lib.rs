// Grailed Product Search - web front end
//
// Serves the search form, runs the listing scraper for each submission and
// hands the resulting CSV back for download.

pub mod config;
pub mod server;

pub use config::*;
