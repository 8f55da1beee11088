//! Seed data loaded on every start.
//!
//! There is no persistence layer: the registry, health log and the listing
//! views are rebuilt from these values each time the process starts.

use chrono::NaiveDate;

use crate::domain::{
    ActivityPeriod, ActivityPoint, ActivitySeries, CalendarEvent, EventKind, InsuranceClaim,
    InsuranceSummary, Meetup, Pet, PetId, PetRecord, RecordKind, Species,
};

const WEEKLY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const WEEKLY_MINUTES: [u32; 7] = [45, 60, 55, 80, 75, 90, 85];
const MONTHLY_LABELS: [&str; 7] = ["Sep", "Oct", "Nov", "Dec", "Jan", "Feb", "Mar"];
const MONTHLY_MINUTES: [u32; 7] = [70, 65, 80, 75, 85, 90, 95];

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The two starter profiles. The first one is active.
pub fn pets() -> Vec<Pet> {
    vec![
        Pet {
            id: PetId::new("pet-1"),
            name: "Miho".to_string(),
            species: Species::Dog,
            breed: "Poodle".to_string(),
            avatar: "https://images.unsplash.com/photo-1516734212186-a967f81ad0d7?auto=format&fit=crop&q=80&w=600&h=600".to_string(),
            birth_date: date(2019, 10, 15),
            weight: 4.8,
            reg_number: Some("410-000-000001".to_string()),
        },
        Pet {
            id: PetId::new("pet-2"),
            name: "Cookie".to_string(),
            species: Species::Cat,
            breed: "Korean Shorthair".to_string(),
            avatar: "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?auto=format&fit=crop&q=80&w=600&h=600".to_string(),
            birth_date: date(2022, 3, 20),
            weight: 3.2,
            reg_number: Some("410-000-000002".to_string()),
        },
    ]
}

/// Starter health log entries, oldest first.
pub fn records() -> Vec<PetRecord> {
    let record = |id: &str, pet: &str, kind, d, value: &str, note: Option<&str>| PetRecord {
        id: id.to_string(),
        pet_id: PetId::new(pet),
        kind,
        date: d,
        value: value.to_string(),
        note: note.map(str::to_string),
    };
    vec![
        record(
            "rec-1",
            "pet-1",
            RecordKind::Vaccine,
            date(2026, 1, 12),
            "DHPPL booster",
            Some("Next dose in one year"),
        ),
        record("rec-2", "pet-1", RecordKind::Weight, date(2026, 2, 24), "5.2kg", None),
        record(
            "rec-3",
            "pet-1",
            RecordKind::Food,
            date(2026, 2, 25),
            "120g",
            Some("Switched to senior formula"),
        ),
        record("rec-4", "pet-2", RecordKind::Weight, date(2026, 2, 20), "3.2kg", None),
        record("rec-5", "pet-2", RecordKind::Water, date(2026, 2, 25), "180ml", None),
    ]
}

/// Activity minutes for the chart.
pub fn activity(period: ActivityPeriod) -> ActivitySeries {
    let (labels, minutes) = match period {
        ActivityPeriod::Weekly => (WEEKLY_LABELS, WEEKLY_MINUTES),
        ActivityPeriod::Monthly => (MONTHLY_LABELS, MONTHLY_MINUTES),
    };
    ActivitySeries {
        period,
        points: labels
            .iter()
            .zip(minutes)
            .map(|(label, minutes)| ActivityPoint {
                label: (*label).to_string(),
                minutes,
            })
            .collect(),
    }
}

/// Meetups listed on the community board.
pub fn meetups() -> Vec<Meetup> {
    let meetup = |title: &str, location: &str, time: &str, members, category: &str| Meetup {
        title: title.to_string(),
        location: location.to_string(),
        time: time.to_string(),
        members,
        category: category.to_string(),
    };
    vec![
        meetup(
            "Night walk at Banpo Hangang Park",
            "Banpo Hangang Park",
            "Tonight 8 PM",
            12,
            "Walk",
        ),
        meetup(
            "Golden retriever family meetup",
            "Gangnam dog playground",
            "This Saturday 14:00",
            25,
            "Breed",
        ),
        meetup(
            "Free behaviour training session",
            "Cafe Puppy, Yeoksam",
            "Mar 2 11:00",
            8,
            "Training",
        ),
        meetup(
            "Picnic with the pups",
            "Olympic Park",
            "Tomorrow 1 PM",
            5,
            "Open",
        ),
        meetup(
            "Walking buddies for small dogs",
            "Apgujeong Rodeo",
            "Every Sunday",
            10,
            "Walk",
        ),
    ]
}

/// Insurance overview for `pet`.
pub fn insurance(pet: &Pet) -> InsuranceSummary {
    InsuranceSummary {
        pet_name: pet.name.clone(),
        plan: "Pet Health Plan".to_string(),
        insurer: "DB Insurance".to_string(),
        coverage_percent: 70,
        annual_limit: 5_000_000,
        used: 1_750_000,
        claims: vec![
            InsuranceClaim {
                title: "Outpatient treatment".to_string(),
                date: "2026-02-10".to_string(),
                amount: 350_000,
                settled: true,
            },
            InsuranceClaim {
                title: "Dental scaling".to_string(),
                date: "2026-02-27".to_string(),
                amount: 1_400_000,
                settled: false,
            },
        ],
    }
}

/// Daily schedule shown under the month grid.
pub fn schedule() -> Vec<CalendarEvent> {
    vec![
        CalendarEvent {
            time: "10:00 AM".to_string(),
            title: "Routine check-up".to_string(),
            location: "Doggy Animal Hospital".to_string(),
            kind: EventKind::Health,
        },
        CalendarEvent {
            time: "4:00 PM".to_string(),
            title: "Walking meetup".to_string(),
            location: "Banpo Hangang Park".to_string(),
            kind: EventKind::Community,
        },
    ]
}
