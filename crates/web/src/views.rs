//! HTML pages.

use std::fmt::Write as _;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use salvo::{
    http::{
        StatusCode,
        header::{HeaderValue, LOCATION},
    },
    prelude::*,
    writing::Scribe,
};
use tracing::error;

use tienda_app::{
    domain::{carts::CartProjection, catalog::models::Product},
    payments::models::PaymentStatus,
};

/// A rendered page, a redirect, or an error page with its status.
#[derive(Debug)]
pub(crate) enum Page {
    Html(String),
    Redirect(HeaderValue),
    Failure(StatusCode, String),
}

impl Page {
    /// 302 to a local path or provider URL.
    pub(crate) fn redirect(location: &str) -> Result<Self, StatusError> {
        HeaderValue::from_str(location)
            .map(Self::Redirect)
            .map_err(|invalid| {
                error!(location, "invalid redirect location: {invalid}");

                StatusError::internal_server_error()
            })
    }
}

impl Scribe for Page {
    fn render(self, res: &mut Response) {
        match self {
            Self::Html(body) => {
                res.render(Text::Html(body));
            }
            Self::Redirect(location) => {
                res.status_code(StatusCode::FOUND);
                res.headers_mut().insert(LOCATION, location);
            }
            Self::Failure(status, body) => {
                res.status_code(status);
                res.render(Text::Html(body));
            }
        }
    }
}

/// Escape text for HTML bodies and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a query parameter value.
pub(crate) fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Format an amount in the shop currency.
pub(crate) fn format_money(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub(crate) fn signup(error: Option<&str>) -> String {
    let error = error
        .map(|message| format!("<p class=\"error\">{}</p>\n", escape(message)))
        .unwrap_or_default();

    layout(
        "Sign up",
        &format!(
            "<h1>Sign up</h1>\n{error}\
             <form action=\"/signup\" method=\"post\">\n\
             <label for=\"email\">Email</label>\n\
             <input type=\"email\" id=\"email\" name=\"email\" required>\n\
             <label for=\"password\">Password</label>\n\
             <input type=\"password\" id=\"password\" name=\"password\" required>\n\
             <button type=\"submit\">Sign up</button>\n\
             </form>"
        ),
    )
}

pub(crate) fn catalog(products: &[&Product], currency: &'static Currency) -> String {
    let mut rows = String::new();

    for product in products {
        _ = writeln!(
            rows,
            "<li>{name} - {price} <a href=\"/agregar_al_carrito/{id}\">Add to cart</a></li>",
            name = escape(&product.name),
            price = format_money(product.unit_price, currency),
            id = product.id,
        );
    }

    layout(
        "Products",
        &format!("<h1>Products</h1>\n<ul>\n{rows}</ul>\n<a href=\"/carrito\">View cart</a>"),
    )
}

pub(crate) fn cart(projection: &CartProjection, currency: &'static Currency) -> String {
    if projection.is_empty() {
        return layout(
            "Cart",
            "<h1>Cart</h1>\n<p>Your cart is empty.</p>\n<a href=\"/\">Keep shopping</a>",
        );
    }

    let mut rows = String::new();

    for item in &projection.items {
        let id = item.product.id;

        _ = writeln!(
            rows,
            "<tr><td>{name}</td><td>{price}</td>\
             <td><form action=\"/carrito/actualizar/{id}\" method=\"post\">\
             <input type=\"number\" name=\"cantidad\" value=\"{quantity}\" min=\"0\">\
             <button type=\"submit\">Update</button></form></td>\
             <td>{subtotal}</td>\
             <td><form action=\"/carrito/eliminar/{id}\" method=\"post\">\
             <button type=\"submit\">Remove</button></form></td></tr>",
            name = escape(&item.product.name),
            price = format_money(item.product.unit_price, currency),
            quantity = item.quantity,
            subtotal = format_money(item.subtotal, currency),
        );
    }

    layout(
        "Cart",
        &format!(
            "<h1>Cart</h1>\n<table>\n\
             <tr><th>Product</th><th>Price</th><th>Quantity</th><th>Subtotal</th><th></th></tr>\n\
             {rows}</table>\n\
             <p>Total: <strong>{total}</strong></p>\n\
             <form action=\"/pago\" method=\"post\"><button type=\"submit\">Pay with Mercado Pago</button></form>\n\
             <a href=\"/compra\">Buy without Mercado Pago</a>\n\
             <a href=\"/\">Keep shopping</a>",
            total = format_money(projection.total, currency),
        ),
    )
}

pub(crate) fn preference_failed(message: &str) -> String {
    layout(
        "Payment error",
        &format!(
            "<p>Error creating the payment preference: {}</p>\n<a href=\"/carrito\">Back to cart</a>",
            escape(message)
        ),
    )
}

pub(crate) fn payment_success(status: Option<&str>, payment_id: Option<&str>) -> String {
    let status = escape(status.unwrap_or_default());
    let payment_id = payment_id.unwrap_or_default();

    layout(
        "Payment received",
        &format!(
            "<h1>Payment {status}!</h1>\n\
             <p>Keep this ID to check the status later: <strong>{id}</strong></p>\n\
             <a href=\"/estado_pago?payment_id={query}\">Check status now</a>",
            id = escape(payment_id),
            query = escape(&encode_query_value(payment_id)),
        ),
    )
}

pub(crate) fn payment_pending() -> String {
    layout(
        "Payment pending",
        "<p>Your payment is pending. We will let you know once it is confirmed.</p>",
    )
}

pub(crate) fn payment_status_form() -> String {
    layout(
        "Payment status",
        "<h2>Check payment status</h2>\n\
         <form action=\"/estado_pago\" method=\"get\">\n\
         <label for=\"payment_id\">Payment ID:</label><br>\n\
         <input type=\"text\" id=\"payment_id\" name=\"payment_id\" required>\n\
         <br><br>\n\
         <button type=\"submit\">Check</button>\n\
         </form>",
    )
}

pub(crate) fn missing_payment_id() -> String {
    layout(
        "Payment status",
        "<p>Missing payment ID. <a href=\"/estado_pago_form\">Back</a></p>",
    )
}

pub(crate) fn payment_status(status: &PaymentStatus, currency: &'static Currency) -> String {
    let amount = status
        .amount
        .clone()
        .map(|amount| format_money(amount, currency))
        .to_string();

    layout(
        "Payment status",
        &format!(
            "<h3>Payment status</h3>\n\
             <p><strong>ID:</strong> {id}</p>\n\
             <p><strong>Status:</strong> {state}</p>\n\
             <p><strong>Amount:</strong> {amount}</p>\n\
             <p><strong>Payment method:</strong> {method}</p>\n\
             <p><strong>Date:</strong> {created_at}</p>\n\
             <p><strong>Payer email:</strong> {email}</p>\n\
             <br><a href=\"/estado_pago_form\">Check another</a>",
            id = escape(&status.payment_id),
            state = escape(&status.status),
            amount = escape(&amount),
            method = escape(&status.method.to_string()),
            created_at = escape(&status.created_at.to_string()),
            email = escape(&status.payer_email.to_string()),
        ),
    )
}

pub(crate) fn payment_status_failed(message: &str) -> String {
    layout(
        "Payment status",
        &format!(
            "<p>Error checking the payment status: {} <br><a href=\"/estado_pago_form\">Back</a></p>",
            escape(message)
        ),
    )
}

pub(crate) fn purchase_sent() -> String {
    layout(
        "Purchase complete",
        "<p>Purchase completed without Mercado Pago. An email with the purchase details has been sent.</p>\n\
         <br><br>\n<a href=\"/\">Keep shopping</a>",
    )
}

pub(crate) fn purchase_failed(message: &str) -> String {
    layout(
        "Purchase error",
        &format!(
            "<p>Error sending the email: {}</p>\n<a href=\"/carrito\">Back to cart</a>",
            escape(message)
        ),
    )
}
