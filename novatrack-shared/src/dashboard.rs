/// Derived state for the admin dashboard
///
/// The dashboard polls `GET /tickets` and derives everything else locally:
/// a four-way status filter, a free-text search, page-size-bounded
/// pagination with the current page clamped into range, and per-status stat
/// cards. These rules live here as pure functions so the API can apply the
/// same filtering server-side (`GET /tickets?estado=&buscar=`) and the
/// behavior stays testable without a UI.
///
/// Search semantics: case-insensitive containment on the full name, exact
/// substring on the cédula.

use crate::models::ticket::{StatusCounts, Ticket, TicketStatus};
use serde::{Deserialize, Serialize};

/// Default page size used by the dashboard list
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Four-way status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    /// No status restriction
    #[default]
    #[serde(rename = "Todos")]
    Todos,

    /// Restrict to a single status
    #[serde(untagged)]
    Solo(TicketStatus),
}

impl StatusFilter {
    /// True when the ticket's status passes the filter
    pub fn matches(&self, estado: TicketStatus) -> bool {
        match self {
            StatusFilter::Todos => true,
            StatusFilter::Solo(wanted) => estado == *wanted,
        }
    }
}

/// True when the ticket passes both the status filter and the search text
///
/// An empty search matches everything.
pub fn matches(ticket: &Ticket, filter: StatusFilter, search: &str) -> bool {
    if !filter.matches(ticket.estado) {
        return false;
    }

    if search.is_empty() {
        return true;
    }

    ticket
        .nombre_completo
        .to_lowercase()
        .contains(&search.to_lowercase())
        || ticket.cedula.contains(search)
}

/// Filters a fetched list down to the tickets passing filter and search
pub fn filter_tickets<'a>(
    tickets: &'a [Ticket],
    filter: StatusFilter,
    search: &str,
) -> Vec<&'a Ticket> {
    tickets
        .iter()
        .filter(|ticket| matches(ticket, filter, search))
        .collect()
}

/// Number of pages for a filtered set; never less than one
pub fn total_pages(filtered_len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    std::cmp::max(1, filtered_len.div_ceil(page_size))
}

/// Clamps a requested 1-based page into the valid range
///
/// Applied after every filter change so shrinking the set never leaves the
/// view on a page past the end.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, std::cmp::max(1, total_pages))
}

/// Returns the slice of `filtered` visible on the (1-based) page
pub fn paginate<T>(filtered: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return filtered;
    }
    let page = clamp_page(page, total_pages(filtered.len(), page_size));
    let start = (page - 1) * page_size;
    let end = std::cmp::min(start + page_size, filtered.len());
    &filtered[start..end]
}

/// Per-status totals over the full (unfiltered) list
pub fn status_counts(tickets: &[Ticket]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for ticket in tickets {
        counts.total += 1;
        match ticket.estado {
            TicketStatus::Pendiente => counts.pendientes += 1,
            TicketStatus::EnProceso => counts.en_proceso += 1,
            TicketStatus::Finalizada => counts.finalizadas += 1,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn ticket(nombre: &str, cedula: &str, estado: TicketStatus) -> Ticket {
        Ticket {
            id: Uuid::new_v4(),
            cedula: cedula.to_string(),
            nombre_completo: nombre.to_string(),
            correo: "someone@example.com".to_string(),
            celular: "3001234567".to_string(),
            descripcion: "Una novedad de prueba con descripción".to_string(),
            estado,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Ticket> {
        vec![
            ticket("Ana María Pérez", "1032456789", TicketStatus::Pendiente),
            ticket("Carlos Gómez", "52123456", TicketStatus::EnProceso),
            ticket("María Rodríguez", "1032999888", TicketStatus::Finalizada),
            ticket("Pedro Páramo", "80111222", TicketStatus::Finalizada),
        ]
    }

    #[test]
    fn test_status_filter_exact_subset() {
        let tickets = sample();
        let done = filter_tickets(&tickets, StatusFilter::Solo(TicketStatus::Finalizada), "");
        assert_eq!(done.len(), 2);
        assert!(done
            .iter()
            .all(|t| t.estado == TicketStatus::Finalizada));
    }

    #[test]
    fn test_todos_passes_everything() {
        let tickets = sample();
        assert_eq!(filter_tickets(&tickets, StatusFilter::Todos, "").len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name() {
        let tickets = sample();
        let hits = filter_tickets(&tickets, StatusFilter::Todos, "maría");
        // "Ana María Pérez" and "María Rodríguez".
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_search_matches_cedula_substring_exactly() {
        let tickets = sample();
        let hits = filter_tickets(&tickets, StatusFilter::Todos, "1032");
        assert_eq!(hits.len(), 2);

        // Cedula matching is exact, not case-folded digits anyway; a
        // non-matching substring finds nothing.
        assert!(filter_tickets(&tickets, StatusFilter::Todos, "9999999").is_empty());
    }

    #[test]
    fn test_combined_filter_is_the_intersection() {
        let tickets = sample();
        let hits = filter_tickets(
            &tickets,
            StatusFilter::Solo(TicketStatus::Finalizada),
            "maría",
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nombre_completo, "María Rodríguez");
    }

    #[test]
    fn test_total_pages_never_zero() {
        assert_eq!(total_pages(0, DEFAULT_PAGE_SIZE), 1);
        assert_eq!(total_pages(8, 8), 1);
        assert_eq!(total_pages(9, 8), 2);
        assert_eq!(total_pages(17, 8), 3);
    }

    #[test]
    fn test_page_clamped_after_filter_shrinks() {
        // Viewing page 3, then a filter cuts the set to one page.
        assert_eq!(clamp_page(3, 1), 1);
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(2, 5), 2);
        assert_eq!(clamp_page(9, 5), 5);
    }

    #[test]
    fn test_paginate_bounds() {
        let items: Vec<i32> = (0..10).collect();
        assert_eq!(paginate(&items, 1, 8), &items[0..8]);
        assert_eq!(paginate(&items, 2, 8), &items[8..10]);
        // Out-of-range page clamps to the last page.
        assert_eq!(paginate(&items, 7, 8), &items[8..10]);
        assert!(paginate::<i32>(&[], 1, 8).is_empty());
    }

    #[test]
    fn test_status_counts() {
        let counts = status_counts(&sample());
        assert_eq!(counts.total, 4);
        assert_eq!(counts.pendientes, 1);
        assert_eq!(counts.en_proceso, 1);
        assert_eq!(counts.finalizadas, 2);
    }

    #[test]
    fn test_status_filter_deserializes_from_wire_labels() {
        let todos: StatusFilter = serde_json::from_str("\"Todos\"").unwrap();
        assert_eq!(todos, StatusFilter::Todos);

        let en_proceso: StatusFilter = serde_json::from_str("\"En proceso\"").unwrap();
        assert_eq!(en_proceso, StatusFilter::Solo(TicketStatus::EnProceso));
    }
}
