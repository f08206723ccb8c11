mod common;
mod csv_store;
mod routing;
