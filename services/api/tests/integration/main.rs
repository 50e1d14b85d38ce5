mod api_test;
mod auth_test;
mod review_test;
