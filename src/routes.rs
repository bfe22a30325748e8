use crate::{
    api::{checkin, employee, justification, leave, schedule, shift_assignment, vacation, visitor},
    config::Config,
};
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

    let scan_limiter = Arc::new(build_limiter(config.rate_scan_per_min));
    let api_limiter = Arc::new(build_limiter(config.rate_api_per_min));

    // Public scan endpoint, shared by employee badges and visitor passes
    cfg.service(
        web::resource("/checkin")
            .wrap(scan_limiter)
            .route(web::post().to(checkin::scan)),
    );

    // Administrative API
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(api_limiter)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::employee_list)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::patch().to(employee::update_employee))
                            .route(web::delete().to(employee::deactivate_employee)),
                    )
                    // /employees/{id}/qr
                    .service(
                        web::resource("/{id}/qr").route(web::post().to(employee::reissue_qr)),
                    ),
            )
            .service(
                web::scope("/schedule-types")
                    // /schedule-types
                    .service(
                        web::resource("")
                            .route(web::post().to(schedule::create_schedule_type))
                            .route(web::get().to(schedule::schedule_type_list)),
                    )
                    // /schedule-types/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::patch().to(schedule::update_schedule_type))
                            .route(web::delete().to(schedule::deactivate_schedule_type)),
                    )
                    // /schedule-types/{id}/weekdays
                    .service(
                        web::resource("/{id}/weekdays")
                            .route(web::put().to(schedule::upsert_weekday_override)),
                    )
                    // /schedule-types/{id}/shifts
                    .service(
                        web::resource("/{id}/shifts")
                            .route(web::post().to(schedule::create_rotating_shift)),
                    ),
            )
            .service(
                web::resource("/rotation-assignments")
                    .route(web::post().to(schedule::create_rotation_assignment)),
            )
            .service(
                web::resource("/schedule/resolve")
                    .route(web::get().to(schedule::resolve_schedule)),
            )
            .service(
                web::scope("/daily-assignments")
                    .service(
                        web::resource("")
                            .route(web::put().to(shift_assignment::upsert_assignment))
                            .route(web::get().to(shift_assignment::assignment_range)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::delete().to(shift_assignment::delete_assignment)),
                    ),
            )
            .service(
                web::resource("/leave-policies").route(web::post().to(leave::create_policy)),
            )
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave::leave_list))
                            .route(web::post().to(leave::create_leave)),
                    )
                    // /leave/{id}/approve-supervisor
                    .service(
                        web::resource("/{id}/approve-supervisor")
                            .route(web::put().to(leave::approve_supervisor)),
                    )
                    // /leave/{id}/approve-management
                    .service(
                        web::resource("/{id}/approve-management")
                            .route(web::put().to(leave::approve_management)),
                    )
                    // /leave/{id}/reject
                    .service(
                        web::resource("/{id}/reject").route(web::put().to(leave::reject_leave)),
                    ),
            )
            .service(
                web::scope("/vacation")
                    .service(
                        web::resource("/periods").route(web::post().to(vacation::create_period)),
                    )
                    .service(
                        web::resource("/balances")
                            .route(web::post().to(vacation::create_balance)),
                    )
                    .service(
                        web::resource("/balances/{id}")
                            .route(web::get().to(vacation::employee_balances)),
                    )
                    .service(
                        web::resource("/requests").route(web::post().to(vacation::create_request)),
                    )
                    .service(
                        web::resource("/requests/{id}/approve-supervisor")
                            .route(web::put().to(vacation::approve_supervisor)),
                    )
                    .service(
                        web::resource("/requests/{id}/approve-management")
                            .route(web::put().to(vacation::approve_management)),
                    )
                    .service(
                        web::resource("/requests/{id}/reject")
                            .route(web::put().to(vacation::reject_request)),
                    ),
            )
            .service(
                web::scope("/justifications")
                    .service(
                        web::resource("")
                            .route(web::post().to(justification::create_justification))
                            .route(web::get().to(justification::justification_list)),
                    )
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(justification::approve_justification)),
                    )
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(justification::reject_justification)),
                    ),
            )
            .service(
                web::scope("/visitors")
                    .service(
                        web::resource("").route(web::post().to(visitor::register_visitor)),
                    )
                    .service(
                        web::resource("/{id}/visits")
                            .route(web::get().to(visitor::visitor_visits)),
                    ),
            ),
    );
}
