use rocket::get;

#[get("/")]
pub fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use crate::services::search_service::testing::FakeGateway;
    use crate::test_client;
    use rocket::http::Status;

    #[test]
    fn health_reports_ok() {
        let client = test_client(FakeGateway::default());
        let response = client.get("/api/health").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().as_deref(), Some("OK"));
    }
}
