#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;
    use serde_json::json;

    use crate::models::{
        Activity, CatalogItem, CatalogSeed, Category, CulinaryItem, Destination, ItemRef, Money,
        Place, SubmissionPhase, Trip, TripDetails, TripStatus, TripSummary,
    };

    fn create_test_trip(status: TripStatus) -> Trip {
        Trip {
            id: 42,
            user_id: "alice".to_string(),
            destination_id: 3,
            name: "Trip to Goa".to_string(),
            status,
            total_budget: Money(28800),
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    fn create_test_place(id: u64, fee: Option<i64>) -> Place {
        Place {
            id,
            destination_id: 3,
            name: format!("Place {id}"),
            description: None,
            entry_fee: fee.map(Money),
            best_time_to_visit: Some("morning".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn test_trip_status_parsing() {
        assert_eq!("planned".parse::<TripStatus>().unwrap(), TripStatus::Planned);
        assert_eq!("ONGOING".parse::<TripStatus>().unwrap(), TripStatus::Ongoing);
        assert_eq!(
            "completed".parse::<TripStatus>().unwrap(),
            TripStatus::Completed
        );
        assert!("cancelled".parse::<TripStatus>().is_err());
        assert_eq!(TripStatus::default(), TripStatus::Planned);
    }

    #[test]
    fn test_trip_status_progression() {
        let mut status = TripStatus::Planned;
        let mut visited = vec![status];
        while let Some(transition) = status.next_transition() {
            assert_eq!(transition.from(), status);
            status = transition.to();
            visited.push(status);
        }

        assert_eq!(
            visited,
            vec![
                TripStatus::Planned,
                TripStatus::Ongoing,
                TripStatus::Completed
            ]
        );
        assert!(TripStatus::Completed.is_terminal());
        assert!(!TripStatus::Planned.is_terminal());
    }

    #[test]
    fn test_submission_phase_guards() {
        assert!(SubmissionPhase::Idle.is_editable());
        assert!(SubmissionPhase::Failed.is_editable());
        assert!(!SubmissionPhase::Done.is_editable());
        assert!(!SubmissionPhase::Creating.is_editable());
        assert!(!SubmissionPhase::Attaching.is_editable());
    }

    #[test]
    fn test_category_parsing_and_keys() {
        assert_eq!("places".parse::<Category>().unwrap(), Category::Place);
        assert_eq!("Activity".parse::<Category>().unwrap(), Category::Activity);
        assert_eq!("dish".parse::<Category>().unwrap(), Category::Culinary);
        assert!("hotel".parse::<Category>().is_err());

        assert_eq!(Category::Activity.nested_key(), "activities");
        assert_eq!(Category::Culinary.reference_key(), "culinary_id");
        assert_eq!(
            Category::ALL,
            [Category::Place, Category::Activity, Category::Culinary]
        );
    }

    #[test]
    fn test_absent_costs_count_as_zero() {
        let destination = Destination {
            id: 1,
            name: "Leh".to_string(),
            country: None,
            category: None,
            climate: None,
            best_season: None,
            flight_cost: Some(Money(9000)),
            stay_cost: None,
            food_cost: Some(Money(1500)),
            description: None,
            image_url: None,
        };
        assert_eq!(destination.base_cost(), Money(10500));

        assert_eq!(create_test_place(1, None).cost(), Money::ZERO);
        assert_eq!(create_test_place(1, Some(250)).cost(), Money(250));
        assert_eq!(create_test_place(9, None).item_ref(), ItemRef::place(9));
    }

    #[test]
    fn test_money_arithmetic() {
        let costs = [Money(100), Money(250), Money::ZERO];
        assert_eq!(costs.iter().sum::<Money>(), Money(350));

        let mut total = Money::from(1000);
        total += Money(500);
        assert_eq!(total.amount(), 1500);
        assert_eq!(Money::or_zero(None), Money::ZERO);
    }

    #[test]
    fn test_money_sums_saturate() {
        assert_eq!(Money(i64::MAX) + Money(1), Money(i64::MAX));
        assert_eq!(Money(i64::MIN) + Money(-1), Money(i64::MIN));

        let mut total = Money(i64::MAX - 10);
        total += Money(100);
        assert_eq!(total, Money(i64::MAX));
        assert_eq!([Money(i64::MAX), Money(i64::MAX)].iter().sum::<Money>(), Money(i64::MAX));
    }

    #[test]
    fn test_destination_serde_field_names() {
        let destination: Destination = serde_json::from_value(json!({
            "id": 3,
            "name": "Goa",
            "country": "India",
            "estimated_flight_cost": 20000,
            "estimated_stay_cost": 5000
        }))
        .unwrap();

        assert_eq!(destination.flight_cost, Some(Money(20000)));
        assert_eq!(destination.food_cost, None);

        let value = serde_json::to_value(&destination).unwrap();
        assert_eq!(value["estimated_stay_cost"], 5000);
        assert!(value.get("image_url").is_none());
    }

    #[test]
    fn test_activity_type_field() {
        let activity: Activity = serde_json::from_value(json!({
            "id": 5,
            "destination_id": 3,
            "name": "Parasailing",
            "type": "water sports",
            "estimated_cost": 1500,
            "duration_hours": 0.5
        }))
        .unwrap();

        assert_eq!(activity.kind.as_deref(), Some("water sports"));
        assert_eq!(activity.cost(), Money(1500));
        assert_eq!(activity.label(), "Parasailing");
    }

    #[test]
    fn test_catalog_seed_defaults() {
        let seed: CatalogSeed = serde_json::from_value(json!({
            "destinations": [{ "id": 1, "name": "Goa" }],
            "culinary": [{ "id": 2, "destination_id": 1, "dish_name": "Bebinca", "avg_price": 200 }]
        }))
        .unwrap();

        assert_eq!(seed.len(), 2);
        assert!(seed.places.is_empty());
        assert!(!seed.is_empty());

        let dish: &CulinaryItem = &seed.culinary[0];
        assert_eq!(dish.label(), "Bebinca");
        assert_eq!(CulinaryItem::CATEGORY, Category::Culinary);
    }

    #[test]
    fn test_empty_trip_details_serialize_lists() {
        let details = TripDetails::empty(create_test_trip(TripStatus::Planned));
        let value = serde_json::to_value(&details).unwrap();

        assert_eq!(value["places"], json!([]));
        assert_eq!(value["activities"], json!([]));
        assert_eq!(value["culinary"], json!([]));
        assert_eq!(details.item_count(), 0);
        assert_eq!(details.items_cost(), Money::ZERO);
    }

    #[test]
    fn test_trip_details_display() {
        let mut details = TripDetails::empty(create_test_trip(TripStatus::Ongoing));
        details.places.push(create_test_place(7, Some(400)));
        details.gaps = 1;

        let output = details.to_string();
        assert!(output.starts_with("# 42. Trip to Goa"));
        assert!(output.contains("- Status: ➤ Ongoing"));
        assert!(output.contains("- Budget: ₹28,800"));
        assert!(output.contains("## Places (1)"));
        assert!(output.contains("- **Place 7** (ID: 7) ₹400, best visited morning"));
        assert!(output.contains("## Activities (0)"));
        assert!(output.contains("1 attached item(s) are no longer in the catalog"));
        assert!(!output.contains("- Updated:"));
    }

    #[test]
    fn test_summary_from_details() {
        let mut details = TripDetails::empty(create_test_trip(TripStatus::Completed));
        details.places.push(create_test_place(1, None));
        details.places.push(create_test_place(2, None));

        let summary = TripSummary::from(&details);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.status, TripStatus::Completed);
        assert_eq!(summary.destination_name, None);
    }
}
