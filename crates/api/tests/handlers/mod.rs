mod health_test;
mod middleware_test;
mod validation_test;
