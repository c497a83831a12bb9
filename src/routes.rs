use crate::{api::attendance, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let write_limiter = Arc::new(build_limiter(config.rate_write_per_min));
    let read_limiter = Arc::new(build_limiter(config.rate_read_per_min));

    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/attendance")
                // literal segments before /{id} so they are matched first
                .service(
                    web::resource("/summary")
                        .wrap(read_limiter.clone())
                        .route(web::get().to(attendance::summary)),
                )
                .service(
                    web::resource("/checkout")
                        .wrap(write_limiter.clone())
                        .route(web::put().to(attendance::check_out_by_name)),
                )
                .service(
                    web::resource("/{id}/checkout")
                        .wrap(write_limiter.clone())
                        .route(web::put().to(attendance::check_out_by_id)),
                )
                .service(
                    web::resource("")
                        .wrap(write_limiter)
                        .route(web::post().to(attendance::check_in))
                        .route(web::get().to(attendance::list_attendance)),
                ),
        ),
    );
}
