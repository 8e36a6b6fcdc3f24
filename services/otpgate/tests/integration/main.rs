mod helpers;
mod http_test;
mod register_test;
