use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{
    ArtistRepository, BookingRepository, CatalogRepository, FavoriteRepository,
    PaymentService, ReviewRepository, SavedArRepository, SlotRepository,
    TattooRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub artist_repo: Arc<dyn ArtistRepository>,
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub tattoo_repo: Arc<dyn TattooRepository>,
    pub slot_repo: Arc<dyn SlotRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub review_repo: Arc<dyn ReviewRepository>,
    pub favorite_repo: Arc<dyn FavoriteRepository>,
    pub saved_ar_repo: Arc<dyn SavedArRepository>,
    pub payment_service: Arc<dyn PaymentService>,
    pub auth_service: Arc<AuthService>,
}
