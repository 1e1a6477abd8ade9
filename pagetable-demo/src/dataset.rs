//! In-process people directory standing in for a remote API.

use std::cmp::Ordering;
use std::time::Duration;

use pagetable::api::{ApiError, ApiResponse, HttpStatus};
use pagetable::table::{Content, LoadRequest, Row};

const FIRST_NAMES: [&str; 12] = [
    "Ada", "Bram", "Chiara", "Dmitri", "Eun-ji", "Farid", "Greta", "Hiroshi", "Inès", "Jonas",
    "Kalani", "Łucja",
];
const CITIES: [&str; 7] = [
    "Lisbon", "Osaka", "Reykjavík", "Nairobi", "Montréal", "Kraków", "Zürich",
];

/// Simulated round trip per request.
const LATENCY: Duration = Duration::from_millis(350);

#[derive(Debug, Clone)]
pub struct Person {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub city: &'static str,
}

/// One page of rows plus the overall count.
#[derive(Debug, Clone)]
pub struct Page {
    pub rows: Vec<Row>,
    pub total: usize,
}

pub struct Dataset {
    people: Vec<Person>,
}

impl Dataset {
    /// Deterministic directory of `count` people.
    pub fn generate(count: u32) -> Self {
        let people = (1..=count)
            .map(|id| {
                let i = id as usize;
                Person {
                    id,
                    name: format!("{} {}", FIRST_NAMES[i % FIRST_NAMES.len()], id),
                    age: 18 + (id * 37) % 60,
                    city: CITIES[(i * 5) % CITIES.len()],
                }
            })
            .collect();
        Self { people }
    }

    /// Answer a load request the way a paging API would.
    ///
    /// Unknown sort keys get a `400 Bad Request`.
    pub async fn fetch(&self, request: LoadRequest) -> Result<ApiResponse<Page>, ApiError> {
        tokio::time::sleep(LATENCY).await;

        let compare: fn(&Person, &Person) -> Ordering = match request.sort_by.as_str() {
            "id" => |a, b| a.id.cmp(&b.id),
            "name" => |a, b| a.name.cmp(&b.name),
            "age" => |a, b| a.age.cmp(&b.age),
            "city" => |a, b| a.city.cmp(&b.city),
            other => {
                return Ok(ApiResponse::bad(
                    HttpStatus::BadRequest,
                    Some(format!("cannot sort by '{other}'")),
                ));
            }
        };

        let mut sorted: Vec<&Person> = self.people.iter().collect();
        sorted.sort_by(|a, b| {
            let ordering = compare(a, b);
            if request.sort_ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

        let rows = sorted
            .into_iter()
            .skip(request.offset())
            .take(request.limit().unwrap_or(usize::MAX))
            .map(to_row)
            .collect();

        Ok(ApiResponse::ok(Page {
            rows,
            total: self.people.len(),
        }))
    }
}

fn to_row(person: &Person) -> Row {
    vec![
        Content::Text(person.id.to_string()),
        Content::Text(person.name.clone()),
        Content::Text(person.age.to_string()),
        Content::Text(person.city.to_string()),
    ]
}
