use crate::{
    api::{attendance, department, dependent, employee, org, payroll},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

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

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_api_per_min))
            .service(
                web::scope("/employee")
                    // /employee
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employee/{id}/dependents
                    .service(
                        web::resource("/{id}/dependents")
                            .route(web::get().to(dependent::list_dependents))
                            .route(web::post().to(dependent::add_dependent)),
                    )
                    // /employee/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/department")
                    .service(
                        web::resource("")
                            .route(web::post().to(department::create_department))
                            .route(web::get().to(department::list_departments)),
                    )
                    .service(
                        web::resource("/{id}/employees")
                            .route(web::get().to(department::department_employees)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(department::get_department))
                            .route(web::put().to(department::update_department))
                            .route(web::delete().to(department::delete_department)),
                    ),
            )
            .service(
                web::scope("/org")
                    .service(
                        web::resource("/region")
                            .route(web::post().to(org::create_region))
                            .route(web::get().to(org::list_regions)),
                    )
                    .service(web::resource("/region/{id}").route(web::delete().to(org::delete_region)))
                    .service(
                        web::resource("/country")
                            .route(web::post().to(org::create_country))
                            .route(web::get().to(org::list_countries)),
                    )
                    .service(
                        web::resource("/country/{id}").route(web::delete().to(org::delete_country)),
                    )
                    .service(
                        web::resource("/location")
                            .route(web::post().to(org::create_location))
                            .route(web::get().to(org::list_locations)),
                    )
                    .service(
                        web::resource("/location/{id}")
                            .route(web::delete().to(org::delete_location)),
                    )
                    .service(
                        web::resource("/job")
                            .route(web::post().to(org::create_job))
                            .route(web::get().to(org::list_jobs)),
                    )
                    .service(web::resource("/job/{id}").route(web::delete().to(org::delete_job))),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("/check-in").route(web::post().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/check-out").route(web::post().to(attendance::check_out)),
                    )
                    .service(web::resource("/summary").route(web::get().to(attendance::summary)))
                    .service(web::resource("").route(web::get().to(attendance::list_attendance)))
                    .service(
                        web::resource("/{id}").route(web::put().to(attendance::update_attendance)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    .service(
                        web::resource("/calculate")
                            // payroll runs are expensive, give them their own budget
                            .wrap(build_limiter(config.rate_payroll_per_min))
                            .route(web::post().to(payroll::calculate_payroll)),
                    )
                    .service(
                        web::resource("/by-department")
                            .route(web::get().to(payroll::payroll_by_department)),
                    )
                    .service(web::resource("").route(web::get().to(payroll::list_payrolls)))
                    .service(web::resource("/{id}").route(web::get().to(payroll::get_payroll))),
            ),
    );
}
