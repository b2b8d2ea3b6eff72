//! Favorable-city selection over aggregated day summaries

use crate::types::CityData;

/// Per-city reduction feeding the selection pass
#[derive(Debug, Clone, PartialEq)]
pub struct CitySummary {
    /// Mean of `temp_avg` over days carrying one; `None` when no day had
    /// a defined temperature, in which case the city never competes
    pub avg_temp: Option<f64>,
    /// Favorable-condition hours summed over all days, including days
    /// without a temperature
    pub cond_hours: u32,
}

/// Reduce a city's days to its selection inputs
pub fn summarize_city(data: &CityData) -> CitySummary {
    let mut temp_sum = 0.0;
    let mut temp_days = 0u32;
    let mut cond_hours = 0u32;

    for day in &data.days {
        if let Some(temp) = day.temp_avg {
            temp_sum += temp;
            temp_days += 1;
        }
        cond_hours += day.relevant_cond_hours;
    }

    CitySummary {
        avg_temp: (temp_days > 0).then(|| temp_sum / f64::from(temp_days)),
        cond_hours,
    }
}

/// Winning city set with the maxima that crowned it
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    /// Cities sharing the winning pair, in pass order
    pub cities: Vec<String>,
    pub avg_temp: f64,
    pub cond_hours: u32,
}

/// Single left-to-right pass maximizing `(avg_temp, cond_hours)`
/// lexicographically, retaining every member of an exact tie on both.
///
/// The pass is order-dependent: a city tying on temperature but losing
/// on hours is dropped for good, even when the surviving leaders later
/// tie among themselves. It must not be recomputed globally.
pub fn select_best<'a, I>(cities: I) -> Option<SelectionResult>
where
    I: IntoIterator<Item = (&'a str, CitySummary)>,
{
    let mut best: Option<SelectionResult> = None;

    for (city, summary) in cities {
        let Some(avg_temp) = summary.avg_temp else {
            continue;
        };

        match best.as_mut() {
            None => {
                best = Some(SelectionResult {
                    cities: vec![city.to_string()],
                    avg_temp,
                    cond_hours: summary.cond_hours,
                });
            }
            Some(b)
                if avg_temp > b.avg_temp
                    || (avg_temp == b.avg_temp && summary.cond_hours > b.cond_hours) =>
            {
                b.cities = vec![city.to_string()];
                b.avg_temp = avg_temp;
                b.cond_hours = summary.cond_hours;
            }
            Some(b) if avg_temp == b.avg_temp && summary.cond_hours == b.cond_hours => {
                b.cities.push(city.to_string());
            }
            Some(_) => {}
        }
    }

    best
}
