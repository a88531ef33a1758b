use luxe_bridge::{
    MessageFromBackend,
    config::BusinessConfig,
    share::{ShareChannel, ShareLink, mailto_link, whatsapp_link},
};
use luxe_quote::{PricingRequest, share_text};

/// Builds the deep link that shares the quote for `request`.
pub(crate) fn share_link(
    business: &BusinessConfig,
    request: &PricingRequest,
    channel: ShareChannel,
) -> ShareLink {
    let breakdown = luxe_quote::calculate(request);
    let text = share_text(&business.name, request, &breakdown);

    let url = match channel {
        ShareChannel::WhatsApp => whatsapp_link(&business.whatsapp_number, &text),
        ShareChannel::Email => mailto_link(
            &business.email,
            &format!("Event Quote - {}", business.name),
            &text,
        ),
    };

    ShareLink { channel, url }
}

/// Handles an incoming share request (see
/// [`luxe_bridge::MessageToBackend::ShareQuoteRequest`]).
pub async fn handle_share_request(
    context: super::AppContextHandle,
    request: PricingRequest,
    channel: ShareChannel,
) {
    let business = {
        let state = context.state.read().await;
        state.config.business.clone()
    };

    let link = share_link(&business, &request, channel);
    log::debug!("Sharing quote via {channel}");
    context
        .send(MessageFromBackend::ShareLinkResponse(link))
        .await;
}

#[cfg(test)]
mod tests {
    use luxe_quote::{EventType, GuestBracket, Location};

    use super::*;
    use crate::services::testing::TestBackend;

    fn business() -> BusinessConfig {
        BusinessConfig {
            name: "Luxe".into(),
            email: "hello@luxe.example".into(),
            whatsapp_number: "+1 (301) 906-3939".into(),
        }
    }

    fn request() -> PricingRequest {
        PricingRequest::new(EventType::Wedding, GuestBracket::UpTo100)
            .at(Location::Lagos)
            .with_service("Balloon Decorations")
    }

    #[test]
    fn whatsapp_link_carries_the_summary() {
        let link = share_link(&business(), &request(), ShareChannel::WhatsApp);

        assert_eq!(link.channel, ShareChannel::WhatsApp);
        assert!(link.url.starts_with(
            "https://wa.me/13019063939?text=Event%20Quote%20from%20Luxe%0A%0AEvent%3A%20Wedding"
        ));
        assert!(link.url.ends_with("Estimated%20Cost%3A%20%E2%82%A655%2C380"));
    }

    #[test]
    fn email_link_is_addressed_to_the_business() {
        let link = share_link(&business(), &request(), ShareChannel::Email);

        assert!(
            link.url
                .starts_with("mailto:hello@luxe.example?subject=Event%20Quote%20-%20Luxe&body=")
        );
    }

    #[tokio::test]
    async fn responds_with_a_link_for_the_configured_business() {
        let mut backend = TestBackend::new();

        handle_share_request(backend.context.clone(), request(), ShareChannel::WhatsApp).await;

        match backend.next_message().await {
            MessageFromBackend::ShareLinkResponse(link) => {
                assert!(link.url.starts_with("https://wa.me/13019063939?text="));
                assert!(link.url.contains("Pinch%20of%20Luxe%20Events"));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
