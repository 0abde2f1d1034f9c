//! Request and response shapes for every entity.
//!
//! Each entity has a base field set shared by its create and output shapes;
//! composite shapes embed related output shapes for read-only views.

pub mod actor;
pub mod customer;
pub mod director;
pub mod play;
pub mod showtime;
pub mod ticket;
pub mod user;
pub mod validation;

pub use actor::{ActorBase, ActorCreate, ActorOut};
pub use customer::{CustomerBase, CustomerCreate, CustomerOut, CustomerWithTickets};
pub use director::{DirectorBase, DirectorCreate, DirectorOut};
pub use play::{PlayBase, PlayCreate, PlayListOut, PlayOut, PlaySearch, PlayUpdate, PlayWithDetails};
pub use showtime::{ShowTimeBase, ShowTimeCreate, ShowTimeOut};
pub use ticket::{TicketBase, TicketCreate, TicketOut, TicketWithRelations};
pub use user::{Role, TokenData, UserBase, UserCreate, UserOut};
pub use validation::{Email, Validate, ValidationError, ValidationErrors};

pub type UserId = i64;
pub type PlayId = i64;
pub type ActorId = i64;
pub type DirectorId = i64;
pub type ShowTimeId = i64;
pub type CustomerId = i64;
pub type TicketId = i64;
