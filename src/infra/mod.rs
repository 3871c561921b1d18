pub mod csv_output;
pub mod http_client;
