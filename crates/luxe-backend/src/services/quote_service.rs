use luxe_bridge::MessageFromBackend;
use luxe_quote::PricingRequest;

/// Handles an incoming quote request (see
/// [`luxe_bridge::MessageToBackend::QuoteRequest`]).
pub async fn handle_quote_request(context: super::AppContextHandle, request: PricingRequest) {
    let breakdown = luxe_quote::calculate(&request);
    log::debug!("Priced {request:?} at {}", breakdown.total);

    context
        .send(MessageFromBackend::QuoteResponse { request, breakdown })
        .await;
}
