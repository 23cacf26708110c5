use chrono::{TimeZone, Utc};
use serde_json::json;
use waf_primitives::{sampled::GetSampledRequestsResponse, TimeWindow};

fn main() {
    let response_json = json!({
        "PopulationSize": 5000,
        "SampledRequests": [
            {
                "Action": "BLOCK",
                "Request": {
                    "ClientIP": "192.0.2.44",
                    "Country": "US",
                    "HTTPVersion": "HTTP/1.1",
                    "Headers": [
                        { "Name": "User-Agent", "Value": "BadBot " }
                    ],
                    "Method": "HEAD",
                    "URI": "/index.html"
                },
                "Timestamp": 1_474_065_000,
                "Weight": 1
            }
        ],
        "TimeWindow": {
            "EndTime": 1_474_066_800,
            "StartTime": 1_474_063_200
        }
    });

    let response: GetSampledRequestsResponse =
        serde_json::from_value(response_json).expect("should deserialize");

    let requested = TimeWindow::new(
        Utc.timestamp_opt(1_474_063_200, 0).unwrap(),
        Utc.timestamp_opt(1_474_074_000, 0).unwrap(),
    );

    // the service hit the sampling cap an hour into the requested three hours
    assert!(response.was_narrowed(&requested));
    assert_eq!(
        Some(Utc.timestamp_opt(1_474_066_800, 0).unwrap()),
        response.effective_window(&requested).end_time
    );
}
