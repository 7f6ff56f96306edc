pub mod answer;
pub mod comment;
pub mod notification;
pub mod question;
pub mod report;
pub mod user;

pub use answer::{Entity as Answer, Model as AnswerModel};
pub use comment::{Entity as Comment, Model as CommentModel};
pub use notification::{Entity as Notification, Model as NotificationModel};
pub use question::{Entity as Question, Model as QuestionModel};
pub use report::{Entity as Report, Model as ReportModel};
pub use user::{Entity as User, Model as UserModel};
