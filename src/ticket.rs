//! E-ticket generation.
//!
//! A [`TicketDocument`] is assembled from a finished booking session and
//! rendered as a single self-contained HTML page. Missing pieces fall back to
//! the sample values the airline shows on its example ticket, so a preview
//! can be rendered before anything is paid.

#[cfg(test)]
#[path = "ticket_test.rs"]
mod ticket_test;

use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::api::{ApiClient, Resource};
use crate::booking::BookingSession;
use crate::payment;
use crate::seats::SeatClass;
use crate::util::datetime;
use crate::util::html::escape;
use crate::util::money::{self, Cop};

pub const DEFAULT_ORIGIN: &str = "BOG";
pub const DEFAULT_DESTINATION: &str = "MDE";
pub const DEFAULT_DEPARTURE_TIME: &str = "08:00";
pub const DEFAULT_ARRIVAL_TIME: &str = "09:15";
pub const DEFAULT_DATE: &str = "2024-02-15";
pub const DEFAULT_DURATION: &str = "1h 15m";
pub const DEFAULT_AIRCRAFT: &str = "Boeing 737";
pub const DEFAULT_SEAT: &str = "12F";
pub const DEFAULT_TOTAL: Cop = 180_000;
pub const TICKET_STATUS: &str = "active";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPassenger {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
}

impl Default for TicketPassenger {
    fn default() -> Self {
        Self {
            name: "Juan Pérez".to_owned(),
            email: "juan@email.com".to_owned(),
            phone: "+57 300 123 4567".to_owned(),
            nationality: "Colombiana".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketService {
    pub name: String,
    pub price: Cop,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDocument {
    pub booking_reference: String,
    pub flight_number: String,
    pub flight_id: Option<i64>,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub date: String,
    pub duration: String,
    pub aircraft: String,
    pub passenger: TicketPassenger,
    pub seat: String,
    pub seat_class: String,
    pub services: Vec<TicketService>,
    pub total_amount: Cop,
    pub created_at: String,
    pub status: String,
    /// False for previews built from an unpaid session.
    #[serde(skip)]
    pub confirmed: bool,
}

impl TicketDocument {
    pub fn from_session(session: &BookingSession, rng: &mut impl Rng, now: OffsetDateTime) -> Self {
        let flight = session.flight.as_ref();
        let booking_reference = session
            .booking_reference()
            .map_or_else(|| payment::booking_reference(now), str::to_owned);

        let date = flight
            .and_then(|f| f.departure_time())
            .map(|dep| datetime::format_date_es(datetime::local_date(dep)))
            .unwrap_or_else(|| DEFAULT_DATE.to_owned());
        let departure_time = flight
            .filter(|f| f.departure_time().is_some())
            .map_or_else(|| DEFAULT_DEPARTURE_TIME.to_owned(), |f| f.departure_hm());
        let arrival_time = flight
            .filter(|f| f.arrival_estimate().is_some())
            .map_or_else(|| DEFAULT_ARRIVAL_TIME.to_owned(), |f| f.arrival_hm());

        let mut passenger = TicketPassenger::default();
        if let Some(lead) = session.lead_passenger() {
            passenger.name = lead.full_name();
            passenger.email.clone_from(&lead.email);
            passenger.phone.clone_from(&lead.phone);
        }
        if let Some(contact) = &session.contact {
            passenger.name = format!("{} {}", contact.first_name.trim(), contact.last_name.trim());
            passenger.email.clone_from(&contact.email);
            passenger.phone.clone_from(&contact.phone);
            passenger.nationality.clone_from(&contact.nationality);
        }

        let seat = session.seat.clone().unwrap_or_else(|| DEFAULT_SEAT.to_owned());
        let total_amount = session
            .payment
            .as_ref()
            .map(|p| p.amount)
            .or_else(|| session.price_breakdown().ok().map(|b| b.total))
            .unwrap_or(DEFAULT_TOTAL);

        Self {
            booking_reference,
            flight_number: format!("AC-{}", rng.random_range(1000..=9999)),
            flight_id: flight.map(|f| f.id),
            origin: flight.map_or_else(|| DEFAULT_ORIGIN.to_owned(), |f| f.origin.clone()),
            destination: flight
                .map_or_else(|| DEFAULT_DESTINATION.to_owned(), |f| f.destination.clone()),
            departure_time,
            arrival_time,
            date,
            duration: flight.map_or_else(|| DEFAULT_DURATION.to_owned(), |f| f.duration_label()),
            aircraft: DEFAULT_AIRCRAFT.to_owned(),
            passenger,
            seat_class: SeatClass::of(&seat).ticket_label().to_owned(),
            seat,
            services: session
                .services
                .iter()
                .map(|s| TicketService {
                    name: s.name.to_owned(),
                    price: s.price,
                })
                .collect(),
            total_amount,
            created_at: datetime::to_iso_utc(now),
            status: TICKET_STATUS.to_owned(),
            confirmed: session.payment.is_some(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("AeroColombiana-Ticket-{}.html", self.booking_reference)
    }

    pub fn render_html(&self) -> String {
        let reference = escape(&self.booking_reference);
        let origin = escape(&self.origin);
        let destination = escape(&self.destination);
        let date = escape(&self.date);

        let passenger_rows = detail_rows(&[
            ("Nombre", self.passenger.name.as_str()),
            ("Email", self.passenger.email.as_str()),
            ("Teléfono", self.passenger.phone.as_str()),
            ("Nacionalidad", self.passenger.nationality.as_str()),
        ]);
        let flight_rows = detail_rows(&[
            ("Fecha", self.date.as_str()),
            ("Asiento", self.seat.as_str()),
            ("Clase", self.seat_class.as_str()),
            ("Aeronave", self.aircraft.as_str()),
        ]);

        let services = if self.services.is_empty() {
            String::new()
        } else {
            let rows: String = self
                .services
                .iter()
                .map(|s| {
                    format!(
                        "        <div class=\"service-item\">\
                         <span>{}</span><span>{}</span></div>\n",
                        escape(&s.name),
                        escape(&money::format_service_price(s.price))
                    )
                })
                .collect();
            format!(
                "      <div class=\"detail-section services\">\n        \
                 <div class=\"detail-title\">Servicios Adicionales</div>\n{rows}      </div>\n"
            )
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>Ticket - {reference}</title>
  <style>
{STYLE}
  </style>
</head>
<body>
  <div class="ticket">
    <div class="header">
      <div class="logo">✈️ AeroColombiana</div>
      <div class="booking-ref">
        <div class="booking-ref-label">Código de Reserva</div>
        <div class="booking-ref-code">{reference}</div>
      </div>
    </div>
    <div class="content">
      <div class="flight-info">
        <div class="airport">
          <div class="airport-code">{origin}</div>
          <div class="airport-name">Origen</div>
          <div class="date-time">{departure}</div>
          <div class="date">{date}</div>
        </div>
        <div class="flight-path">
          <div class="flight-number">Vuelo {flight_number}</div>
          <div class="duration">{duration}</div>
          <div class="note">Vuelo directo</div>
        </div>
        <div class="airport">
          <div class="airport-code">{destination}</div>
          <div class="airport-name">Destino</div>
          <div class="date-time">{arrival}</div>
          <div class="date">{date}</div>
        </div>
      </div>
      <div class="details-grid">
        <div class="detail-section">
          <div class="detail-title">Información del Pasajero</div>
{passenger_rows}        </div>
        <div class="detail-section">
          <div class="detail-title">Detalles del Vuelo</div>
{flight_rows}        </div>
      </div>
{services}      <div class="total">
        <div>Total Pagado</div>
        <div class="total-amount">{total}</div>
      </div>
      <div class="important-info">
        <div class="important-title">Información Importante</div>
        <div class="important-list">
          • Presenta este ticket y tu documento de identidad en el aeropuerto<br>
          • Llegada recomendada: 2 horas antes para vuelos nacionales<br>
          • El check-in online estará disponible 24 horas antes del vuelo<br>
          • Equipaje de mano: máximo 10kg y dimensiones 55x40x25cm<br>
          • Conserva este ticket hasta completar tu viaje
        </div>
      </div>
      <div class="qr-section">
        <div class="qr-title">Código QR del Ticket</div>
        <div class="qr-code">⬜⬛⬜⬛⬜⬛⬜</div>
        <div class="qr-hint">Escanea este código en el aeropuerto</div>
      </div>
    </div>
  </div>
</body>
</html>
"#,
            departure = escape(&self.departure_time),
            arrival = escape(&self.arrival_time),
            flight_number = escape(&self.flight_number),
            duration = escape(&self.duration),
            total = escape(&money::format_cop_label(self.total_amount)),
        )
    }
}

/// One `detail-item` line per label/value pair; values are escaped.
fn detail_rows(items: &[(&str, &str)]) -> String {
    items
        .iter()
        .map(|(label, value)| {
            format!(
                "          <div class=\"detail-item\"><span class=\"detail-label\">{label}:</span>\
                 <span class=\"detail-value\">{}</span></div>\n",
                escape(value)
            )
        })
        .collect()
}

const STYLE: &str = "    body { font-family: Arial, sans-serif; margin: 0; padding: 20px;
      background: #f5f5f5; }
    .ticket { background: white; max-width: 800px; margin: 0 auto; border-radius: 10px;
      overflow: hidden; }
    .header { background: linear-gradient(135deg, #0ea5e9, #3b82f6); color: white; padding: 30px;
      display: flex; justify-content: space-between; }
    .logo { font-size: 28px; font-weight: bold; }
    .booking-ref { text-align: right; }
    .booking-ref-code { font-size: 24px; font-weight: bold; letter-spacing: 2px; }
    .content { padding: 30px; }
    .flight-info { display: flex; justify-content: space-between; padding: 20px;
      background: #f8fafc; border-radius: 8px; }
    .airport, .flight-path { flex: 1; text-align: center; }
    .airport-code { font-size: 32px; font-weight: bold; color: #0ea5e9; }
    .details-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 30px; margin: 30px 0; }
    .detail-section { border: 1px solid #e2e8f0; border-radius: 8px; padding: 20px; }
    .detail-item, .service-item { display: flex; justify-content: space-between;
      margin-bottom: 8px; }
    .total { background: #0ea5e9; color: white; padding: 20px; text-align: center;
      margin-top: 30px; border-radius: 8px; }
    .total-amount { font-size: 24px; font-weight: bold; }
    .important-info { background: #fef3c7; border: 1px solid #f59e0b; border-radius: 8px;
      padding: 20px; margin-top: 30px; }
    .qr-section { text-align: center; margin-top: 30px; padding: 20px; background: #f8fafc; }
    @media print { body { background: white; padding: 0; } .ticket { max-width: none; } }";

/// Persist a confirmed ticket to `/tiquetes`. Previews are never sent, and a
/// backend failure only costs the stored copy.
pub async fn save_ticket(api: &ApiClient, doc: &TicketDocument) -> Option<Value> {
    if !doc.confirmed {
        tracing::debug!(reference = %doc.booking_reference, "ticket preview not persisted");
        return None;
    }
    match api.create(Resource::Tickets, doc).await {
        Ok(saved) => {
            tracing::info!(reference = %doc.booking_reference, "ticket saved");
            Some(saved)
        }
        Err(e) => {
            tracing::warn!(
                reference = %doc.booking_reference,
                error = %e,
                "could not save ticket; continuing"
            );
            None
        }
    }
}
