//! Reading explicit hosts from the program's teams file.

use std::io::Read;

use serde::Deserialize;

use crate::cohort::HostRecord;
use crate::github::CollectError;

/// Headers `TeamsRow` reads; each must be present even when its cells are blank.
const REQUIRED_COLUMNS: [&str; 4] = [
    "Github username 1",
    "Github username 2",
    "Start Date",
    "Team Number",
];

#[derive(Debug, Deserialize)]
struct TeamsRow {
    #[serde(rename = "Github username 1")]
    first_username: String,
    #[serde(rename = "Github username 2")]
    second_username: String,
    #[serde(rename = "Start Date")]
    start_date: String,
    #[serde(rename = "Team Number")]
    team: String,
}

impl TeamsRow {
    fn into_hosts(self) -> impl Iterator<Item = HostRecord> {
        let Self {
            first_username,
            second_username,
            start_date,
            team,
        } = self;
        [first_username, second_username]
            .into_iter()
            .map(|username| username.trim().to_owned())
            .filter(|username| !username.is_empty())
            .map(move |username| HostRecord {
                username,
                start_date: start_date.clone(),
                team: team.clone(),
            })
    }
}

/// Reads the teams CSV; every non-empty username column becomes a host
/// sharing its row's start date and team.
///
/// `source` names the input in error messages.
///
/// # Errors
///
/// Returns [`CollectError::Csv`] when the file lacks the expected columns or
/// a row cannot be read.
pub fn load_team_hosts<R: Read>(reader: R, source: &str) -> Result<Vec<HostRecord>, CollectError> {
    let csv_error = |message: String| CollectError::Csv {
        path: source.to_owned(),
        message,
    };
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|error| csv_error(error.to_string()))?;
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(csv_error(format!("missing required column '{missing}'")));
    }

    let mut hosts = Vec::new();
    for row in csv_reader.deserialize::<TeamsRow>() {
        let parsed = row.map_err(|error| csv_error(error.to_string()))?;
        hosts.extend(parsed.into_hosts());
    }
    Ok(hosts)
}
