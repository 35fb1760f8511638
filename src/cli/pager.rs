//! Raw-data paging: successive five-row windows of the filtered dataset.

use crate::models::{Columns, Trip};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

const TIMESTAMP_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

/// Tracks the offset of the next window. Windows never overlap.
#[derive(Debug, Clone)]
pub struct RawDataPager {
    offset: usize,
    page_size: usize,
}

impl RawDataPager {
    pub fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns `trips[offset..offset + page_size]`, clamped to the slice, and advances.
    /// Past the end the window is empty.
    pub fn next_page<'a>(&mut self, trips: &'a [Trip]) -> &'a [Trip] {
        let start = self.offset.min(trips.len());
        let end = self.offset.saturating_add(self.page_size).min(trips.len());
        self.offset = self.offset.saturating_add(self.page_size);
        &trips[start..end]
    }
}

impl Default for RawDataPager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

/// Renders a page as a table with one column per present schema column.
/// `first_row` is the dataset index of `page[0]`.
pub fn render_page(page: &[Trip], first_row: usize, columns: &Columns) -> Table {
    let mut header = vec!["#"];
    header.extend(columns.present());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for (i, trip) in page.iter().enumerate() {
        table.add_row(row_cells(trip, first_row + i, columns));
    }
    table
}

fn row_cells(trip: &Trip, index: usize, columns: &Columns) -> Vec<String> {
    let timestamp = |t: &Option<chrono::NaiveDateTime>| {
        t.map(|t| t.format(TIMESTAMP_DISPLAY).to_string())
            .unwrap_or_default()
    };
    let text = |s: &Option<String>| s.clone().unwrap_or_default();
    let number = |n: Option<f64>| n.map(|n| n.to_string()).unwrap_or_default();

    let mut cells = vec![index.to_string()];
    let fields = [
        (columns.start_time, timestamp(&trip.start_time)),
        (columns.end_time, timestamp(&trip.end_time)),
        (columns.start_station, text(&trip.start_station)),
        (columns.end_station, text(&trip.end_station)),
        (columns.trip_duration, number(trip.trip_duration)),
        (columns.user_type, text(&trip.user_type)),
        (columns.gender, text(&trip.gender)),
        (columns.birth_year, number(trip.birth_year)),
    ];
    cells.extend(
        fields
            .into_iter()
            .filter_map(|(present, value)| present.then_some(value)),
    );
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawTrip;

    fn trips(n: usize) -> Vec<Trip> {
        (0..n)
            .map(|i| {
                let raw = RawTrip {
                    start_station: Some(format!("Station {}", i)),
                    ..Default::default()
                };
                Trip::new(raw, None, None)
            })
            .collect()
    }

    #[test]
    fn test_pages_advance_without_overlap() {
        let data = trips(12);
        let mut pager = RawDataPager::default();

        let first = pager.next_page(&data);
        assert_eq!(first, &data[0..5]);
        assert_eq!(pager.offset(), 5);

        let second = pager.next_page(&data);
        assert_eq!(second, &data[5..10]);

        let third = pager.next_page(&data);
        assert_eq!(third, &data[10..12]);

        assert!(pager.next_page(&data).is_empty());
        assert!(pager.next_page(&data).is_empty());
    }

    #[test]
    fn test_page_of_empty_dataset() {
        let mut pager = RawDataPager::default();
        assert!(pager.next_page(&[]).is_empty());
    }

    #[test]
    fn test_render_page_shows_present_columns_only() {
        let data = trips(2);
        let columns = Columns {
            gender: false,
            birth_year: false,
            ..Columns::all()
        };
        let rendered = render_page(&data, 5, &columns).to_string();

        assert!(rendered.contains("Start Station"));
        assert!(rendered.contains("User Type"));
        assert!(!rendered.contains("Gender"));
        assert!(rendered.contains("Station 1"));
        // Row numbers continue from the page offset.
        assert!(rendered.contains(" 5 "));
        assert!(rendered.contains(" 6 "));
    }

    #[test]
    fn test_row_cells_formats_values() {
        let raw = RawTrip {
            trip_duration: Some(489.066),
            birth_year: Some(1992.0),
            ..Default::default()
        };
        let start = chrono::NaiveDate::from_ymd_opt(2017, 6, 21)
            .unwrap()
            .and_hms_opt(8, 36, 34)
            .unwrap();
        let trip = Trip::new(raw, Some(start), None);
        let cells = row_cells(&trip, 0, &Columns::all());

        assert_eq!(cells.len(), 9);
        assert_eq!(cells[1], "2017-06-21 08:36:34");
        assert_eq!(cells[2], "");
        assert_eq!(cells[5], "489.066");
        assert_eq!(cells[8], "1992");
    }
}
