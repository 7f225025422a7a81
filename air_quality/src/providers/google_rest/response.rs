use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    models::{
        bucket::{Bucket, Concentration, DisplayConcentration},
        current::{CurrentReading, IndexColor, PollutantInfo},
    },
    providers::{HistoryPage, ProviderError},
};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AqiIndex {
    pub code: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub aqi: i64,
    #[serde(default)]
    pub aqi_display: String,
    #[serde(default)]
    pub color: IndexColor,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub dominant_pollutant: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Pollutant {
    pub code: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub full_name: String,
    pub concentration: Option<Concentration>,
    #[serde(default)]
    pub additional_info: PollutantInfo,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HourInfo {
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub indexes: Vec<AqiIndex>,
    #[serde(default)]
    pub pollutants: Vec<Pollutant>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    #[serde(default)]
    pub hours_info: Vec<HourInfo>,
    #[serde(default)]
    pub region_code: String,
    #[serde(default)]
    pub next_page_token: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CurrentResponse {
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub region_code: String,
    #[serde(default)]
    pub indexes: Vec<AqiIndex>,
    #[serde(default)]
    pub pollutants: Vec<Pollutant>,
}

/// The pollutant named by the index as dominant, else the first one listed.
fn dominant<'a>(index: &AqiIndex, pollutants: &'a [Pollutant]) -> Option<&'a Pollutant> {
    pollutants
        .iter()
        .find(|p| p.code.eq_ignore_ascii_case(&index.dominant_pollutant))
        .or_else(|| pollutants.first())
}

fn first_index<'a>(indexes: &'a [AqiIndex], at: &DateTime<Utc>) -> Result<&'a AqiIndex, ProviderError> {
    indexes
        .first()
        .ok_or_else(|| ProviderError::malformed(format!("no air quality index for {at}")))
}

fn concentration_of(p: &Pollutant, at: &DateTime<Utc>) -> Result<Concentration, ProviderError> {
    p.concentration.clone().ok_or_else(|| {
        ProviderError::malformed(format!("pollutant {} has no concentration for {at}", p.code))
    })
}

impl HourInfo {
    pub fn into_bucket(self) -> Result<Bucket, ProviderError> {
        let index = first_index(&self.indexes, &self.date_time)?;
        let pollutant = dominant(index, &self.pollutants).ok_or_else(|| {
            ProviderError::malformed(format!("no pollutants for {}", self.date_time))
        })?;

        Ok(Bucket {
            timestamp: self.date_time,
            aqi_code: index.code.clone(),
            aqi_display_name: index.display_name.clone(),
            aqi_value: index.aqi,
            aqi_display_value: index.aqi_display.clone(),
            dominant_pollutant_code: index.dominant_pollutant.clone(),
            dominant_pollutant_display_name: pollutant.display_name.clone(),
            dominant_pollutant_concentration: concentration_of(pollutant, &self.date_time)?,
        })
    }
}

impl HistoryResponse {
    pub fn into_page(self) -> Result<HistoryPage, ProviderError> {
        let buckets = self
            .hours_info
            .into_iter()
            .map(HourInfo::into_bucket)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HistoryPage {
            buckets,
            next_page_token: self.next_page_token,
        })
    }
}

impl CurrentResponse {
    pub fn into_reading(self) -> Result<CurrentReading, ProviderError> {
        let index = first_index(&self.indexes, &self.date_time)?;
        let pollutant = dominant(index, &self.pollutants).ok_or_else(|| {
            ProviderError::malformed(format!("no pollutants for {}", self.date_time))
        })?;
        let concentration = concentration_of(pollutant, &self.date_time)?;

        Ok(CurrentReading {
            date_time: self.date_time,
            region_code: self.region_code.clone(),
            aqi_code: index.code.clone(),
            aqi_display_name: index.display_name.clone(),
            aqi_value: index.aqi,
            aqi_value_display: index.aqi_display.clone(),
            aqi_color: index.color,
            aqi_category: index.category.clone(),
            dominant_pollutant_code: index.dominant_pollutant.clone(),
            dominant_pollutant_display_name: pollutant.display_name.clone(),
            dominant_pollutant_full_name: pollutant.full_name.clone(),
            dominant_pollutant_concentration: DisplayConcentration::from(&concentration),
            dominant_pollutant_additional_info: pollutant.additional_info.clone(),
        })
    }
}
