use crate::models::*;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::info;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@collabzone.com";

/// One in-memory table: rows keyed by id plus the next id to hand out.
/// Ids start at 1 and only ever grow, even across deletes.
struct Table<T> {
    rows: HashMap<i32, T>,
    next_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Table {
            rows: HashMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn remove(&mut self, id: i32) -> bool {
        self.rows.remove(&id).is_some()
    }
}

struct Tables {
    colleges: Table<College>,
    events: Table<Event>,
    registrations: Table<Registration>,
    feed_posts: Table<FeedPost>,
    admins: Table<Admin>,
    users: Table<User>,
}

/// Filters for the public event listing.
#[derive(Debug, Default)]
pub struct EventFilter {
    pub college_id: Option<i32>,
    pub category: Option<String>,
    pub time: Option<TimeWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Upcoming,
    Past,
}

/// The record store backing every route handler. All six tables sit behind
/// a single mutex so each request observes and mutates a consistent
/// snapshot; constructed once in `main` and shared through `Extension`.
pub struct Store {
    tables: Mutex<Tables>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Store {
            tables: Mutex::new(Tables {
                colleges: Table::new(),
                events: Table::new(),
                registrations: Table::new(),
                feed_posts: Table::new(),
                admins: Table::new(),
                users: Table::new(),
            }),
        }
    }

    /// Creates the built-in super admin account unless one already exists.
    pub async fn seed_default_admin(&self) -> Admin {
        if let Some(existing) = self.admin_by_username(DEFAULT_ADMIN_USERNAME).await {
            return existing;
        }
        let admin = self
            .create_admin(NewAdmin {
                username: DEFAULT_ADMIN_USERNAME.to_string(),
                email: DEFAULT_ADMIN_EMAIL.to_string(),
                password: DEFAULT_ADMIN_PASSWORD.to_string(),
                role: "superadmin".to_string(),
            })
            .await;
        info!("seeded default admin account \"{}\"", admin.username);
        admin
    }

    // colleges

    /// Returns `None` when the email is already taken.
    pub async fn create_college(&self, new: NewCollege) -> Option<College> {
        let mut t = self.tables.lock().await;
        if t.colleges.rows.values().any(|c| c.email == new.email) {
            return None;
        }
        Some(t.colleges.insert(|id| College {
            id,
            name: new.name,
            email: new.email,
            password: new.password,
            location: new.location,
            description: new.description,
            is_approved: true,
            students_count: 0,
            created_at: Utc::now(),
        }))
    }

    pub async fn get_college(&self, id: i32) -> Option<College> {
        self.tables.lock().await.colleges.get(id)
    }

    pub async fn college_by_email(&self, email: &str) -> Option<College> {
        let t = self.tables.lock().await;
        t.colleges.rows.values().find(|c| c.email == email).cloned()
    }

    pub async fn list_colleges(&self) -> Vec<College> {
        let t = self.tables.lock().await;
        sorted_by_id(t.colleges.rows.values().cloned().collect(), |c| c.id)
    }

    pub async fn list_approved_colleges(&self) -> Vec<College> {
        let t = self.tables.lock().await;
        sorted_by_id(
            t.colleges
                .rows
                .values()
                .filter(|c| c.is_approved)
                .cloned()
                .collect(),
            |c| c.id,
        )
    }

    pub async fn update_college(&self, id: i32, update: CollegeUpdate) -> Option<College> {
        let mut t = self.tables.lock().await;
        let college = t.colleges.rows.get_mut(&id)?;
        update.apply(college);
        Some(college.clone())
    }

    pub async fn delete_college(&self, id: i32) -> bool {
        self.tables.lock().await.colleges.remove(id)
    }

    // events

    /// Returns `None` when the referenced college does not exist.
    pub async fn create_event(&self, new: NewEvent) -> Option<Event> {
        let mut t = self.tables.lock().await;
        if !t.colleges.rows.contains_key(&new.college_id) {
            return None;
        }
        Some(t.events.insert(|id| Event {
            id,
            name: new.name,
            college_id: new.college_id,
            date: new.date,
            fee: new.fee,
            category: new.category,
            location: new.location,
            max_participants: new.max_participants,
            current_participants: 0,
            hosts: new.hosts,
            contact_numbers: new.contact_numbers,
            is_active: true,
            created_at: Utc::now(),
        }))
    }

    pub async fn get_event(&self, id: i32) -> Option<Event> {
        self.tables.lock().await.events.get(id)
    }

    /// Active events matching the filter, ids ascending.
    pub async fn list_events(&self, filter: &EventFilter) -> Vec<Event> {
        let t = self.tables.lock().await;
        let now = Utc::now();
        sorted_by_id(
            t.events
                .rows
                .values()
                .filter(|e| e.is_active)
                .filter(|e| filter.college_id.map_or(true, |id| e.college_id == id))
                .filter(|e| {
                    filter
                        .category
                        .as_deref()
                        .map_or(true, |c| e.category.as_deref() == Some(c))
                })
                .filter(|e| match filter.time {
                    Some(TimeWindow::Upcoming) => e.date >= now,
                    Some(TimeWindow::Past) => e.date < now,
                    None => true,
                })
                .cloned()
                .collect(),
            |e| e.id,
        )
    }

    /// Every event, inactive ones included. Admin view only.
    pub async fn list_all_events(&self) -> Vec<Event> {
        let t = self.tables.lock().await;
        sorted_by_id(t.events.rows.values().cloned().collect(), |e| e.id)
    }

    pub async fn update_event(&self, id: i32, update: EventUpdate) -> Option<Event> {
        let mut t = self.tables.lock().await;
        let event = t.events.rows.get_mut(&id)?;
        update.apply(event);
        Some(event.clone())
    }

    pub async fn delete_event(&self, id: i32) -> bool {
        self.tables.lock().await.events.remove(id)
    }

    // registrations

    /// Returns `None` when the referenced event does not exist. The parent
    /// event's participant count goes up by one under the same lock; it is
    /// advisory only and is never checked against `max_participants` nor
    /// decremented when a registration is deleted.
    pub async fn create_registration(&self, new: NewRegistration) -> Option<Registration> {
        let mut t = self.tables.lock().await;
        let event = t.events.rows.get_mut(&new.event_id)?;
        event.current_participants += 1;
        Some(t.registrations.insert(|id| Registration {
            id,
            event_id: new.event_id,
            full_name: new.full_name,
            email: new.email,
            phone: new.phone,
            college: new.college,
            course: new.course,
            address: new.address,
            is_verified: false,
            registered_at: Utc::now(),
        }))
    }

    pub async fn get_registration(&self, id: i32) -> Option<Registration> {
        self.tables.lock().await.registrations.get(id)
    }

    pub async fn registrations_for_event(&self, event_id: i32) -> Vec<Registration> {
        let t = self.tables.lock().await;
        sorted_by_id(
            t.registrations
                .rows
                .values()
                .filter(|r| r.event_id == event_id)
                .cloned()
                .collect(),
            |r| r.id,
        )
    }

    pub async fn update_registration(
        &self,
        id: i32,
        update: RegistrationUpdate,
    ) -> Option<Registration> {
        let mut t = self.tables.lock().await;
        let registration = t.registrations.rows.get_mut(&id)?;
        update.apply(registration);
        Some(registration.clone())
    }

    pub async fn delete_registration(&self, id: i32) -> bool {
        self.tables.lock().await.registrations.remove(id)
    }

    // feed posts

    pub async fn create_feed_post(&self, new: NewFeedPost) -> FeedPost {
        let mut t = self.tables.lock().await;
        t.feed_posts.insert(|id| FeedPost {
            id,
            author: new.author,
            college: new.college,
            content: new.content,
            image_url: new.image_url,
            likes: 0,
            comments: Vec::new(),
            is_approved: false,
            created_at: Utc::now(),
        })
    }

    pub async fn get_feed_post(&self, id: i32) -> Option<FeedPost> {
        self.tables.lock().await.feed_posts.get(id)
    }

    pub async fn list_feed_posts(&self) -> Vec<FeedPost> {
        let t = self.tables.lock().await;
        sorted_by_id(t.feed_posts.rows.values().cloned().collect(), |p| p.id)
    }

    pub async fn list_approved_feed_posts(&self) -> Vec<FeedPost> {
        let t = self.tables.lock().await;
        sorted_by_id(
            t.feed_posts
                .rows
                .values()
                .filter(|p| p.is_approved)
                .cloned()
                .collect(),
            |p| p.id,
        )
    }

    pub async fn update_feed_post(&self, id: i32, update: FeedPostUpdate) -> Option<FeedPost> {
        let mut t = self.tables.lock().await;
        let post = t.feed_posts.rows.get_mut(&id)?;
        update.apply(post);
        Some(post.clone())
    }

    pub async fn delete_feed_post(&self, id: i32) -> bool {
        self.tables.lock().await.feed_posts.remove(id)
    }

    // admins

    pub async fn create_admin(&self, new: NewAdmin) -> Admin {
        let mut t = self.tables.lock().await;
        t.admins.insert(|id| Admin {
            id,
            username: new.username,
            email: new.email,
            password: new.password,
            role: new.role,
            created_at: Utc::now(),
        })
    }

    pub async fn get_admin(&self, id: i32) -> Option<Admin> {
        self.tables.lock().await.admins.get(id)
    }

    pub async fn admin_by_username(&self, username: &str) -> Option<Admin> {
        let t = self.tables.lock().await;
        t.admins
            .rows
            .values()
            .find(|a| a.username == username)
            .cloned()
    }

    pub async fn list_admins(&self) -> Vec<Admin> {
        let t = self.tables.lock().await;
        sorted_by_id(t.admins.rows.values().cloned().collect(), |a| a.id)
    }

    pub async fn update_admin(&self, id: i32, update: AdminUpdate) -> Option<Admin> {
        let mut t = self.tables.lock().await;
        let admin = t.admins.rows.get_mut(&id)?;
        update.apply(admin);
        Some(admin.clone())
    }

    pub async fn delete_admin(&self, id: i32) -> bool {
        self.tables.lock().await.admins.remove(id)
    }

    // users

    pub async fn create_user(&self, new: NewUser) -> User {
        let mut t = self.tables.lock().await;
        t.users.insert(|id| User {
            id,
            username: new.username,
            email: new.email,
            role: new.role,
            college_id: new.college_id,
        })
    }

    pub async fn get_user(&self, id: i32) -> Option<User> {
        self.tables.lock().await.users.get(id)
    }

    pub async fn list_users(&self) -> Vec<User> {
        let t = self.tables.lock().await;
        sorted_by_id(t.users.rows.values().cloned().collect(), |u| u.id)
    }

    pub async fn update_user(&self, id: i32, update: UserUpdate) -> Option<User> {
        let mut t = self.tables.lock().await;
        let user = t.users.rows.get_mut(&id)?;
        update.apply(user);
        Some(user.clone())
    }

    pub async fn delete_user(&self, id: i32) -> bool {
        self.tables.lock().await.users.remove(id)
    }
}

fn sorted_by_id<T>(mut rows: Vec<T>, id: impl Fn(&T) -> i32) -> Vec<T> {
    rows.sort_by_key(id);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn college(email: &str) -> NewCollege {
        NewCollege {
            name: "Tech U".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            location: "City".to_string(),
            description: None,
        }
    }

    fn event(college_id: i32, name: &str) -> NewEvent {
        NewEvent {
            name: name.to_string(),
            college_id,
            date: Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap(),
            fee: 0,
            category: None,
            location: None,
            max_participants: None,
            hosts: Vec::new(),
            contact_numbers: Vec::new(),
        }
    }

    fn registration(event_id: i32) -> NewRegistration {
        NewRegistration {
            event_id,
            full_name: "Jane".to_string(),
            email: "j@x.com".to_string(),
            phone: "1234567890".to_string(),
            college: "X".to_string(),
            course: "CS".to_string(),
            address: None,
        }
    }

    #[tokio::test]
    async fn college_ids_increase_monotonically() {
        let store = Store::new();
        let a = store.create_college(college("a@b.com")).await.unwrap();
        let b = store.create_college(college("b@b.com")).await.unwrap();
        store.delete_college(b.id).await;
        let c = store.create_college(college("c@b.com")).await.unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    }

    #[tokio::test]
    async fn create_college_applies_defaults() {
        let store = Store::new();
        let c = store.create_college(college("a@b.com")).await.unwrap();
        assert!(c.is_approved);
        assert_eq!(c.students_count, 0);
    }

    #[tokio::test]
    async fn duplicate_college_email_is_rejected() {
        let store = Store::new();
        assert!(store.create_college(college("a@b.com")).await.is_some());
        assert!(store.create_college(college("a@b.com")).await.is_none());
    }

    #[tokio::test]
    async fn college_lookup_by_email() {
        let store = Store::new();
        let created = store.create_college(college("a@b.com")).await.unwrap();
        let found = store.college_by_email("a@b.com").await.unwrap();
        assert_eq!(found.id, created.id);
        assert!(store.college_by_email("nobody@b.com").await.is_none());
    }

    #[tokio::test]
    async fn unapproved_colleges_are_hidden_from_public_listing() {
        let store = Store::new();
        let a = store.create_college(college("a@b.com")).await.unwrap();
        let b = store.create_college(college("b@b.com")).await.unwrap();
        store
            .update_college(
                b.id,
                CollegeUpdate {
                    is_approved: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let public: Vec<i32> = store
            .list_approved_colleges()
            .await
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(public, vec![a.id]);
        assert_eq!(store.list_colleges().await.len(), 2);
    }

    #[tokio::test]
    async fn create_event_requires_college() {
        let store = Store::new();
        assert!(store.create_event(event(1, "Fest")).await.is_none());
        store.create_college(college("a@b.com")).await.unwrap();
        let e = store.create_event(event(1, "Fest")).await.unwrap();
        assert_eq!(e.current_participants, 0);
        assert!(e.is_active);
    }

    #[tokio::test]
    async fn registration_increments_event_count() {
        let store = Store::new();
        store.create_college(college("a@b.com")).await.unwrap();
        let e = store.create_event(event(1, "Fest")).await.unwrap();

        let r = store.create_registration(registration(e.id)).await.unwrap();
        assert!(!r.is_verified);
        assert_eq!(store.get_event(e.id).await.unwrap().current_participants, 1);

        store.create_registration(registration(e.id)).await.unwrap();
        assert_eq!(store.get_event(e.id).await.unwrap().current_participants, 2);
    }

    #[tokio::test]
    async fn registration_for_missing_event_is_rejected() {
        let store = Store::new();
        assert!(store.create_registration(registration(7)).await.is_none());
    }

    #[tokio::test]
    async fn deleting_a_registration_leaves_the_count_untouched() {
        // capacity accounting is advisory: no decrement on delete
        let store = Store::new();
        store.create_college(college("a@b.com")).await.unwrap();
        let e = store.create_event(event(1, "Fest")).await.unwrap();
        let r = store.create_registration(registration(e.id)).await.unwrap();

        assert!(store.delete_registration(r.id).await);
        assert_eq!(store.get_event(e.id).await.unwrap().current_participants, 1);
    }

    #[tokio::test]
    async fn update_event_merges_shallowly() {
        let store = Store::new();
        store.create_college(college("a@b.com")).await.unwrap();
        let e = store.create_event(event(1, "Fest")).await.unwrap();

        let updated = store
            .update_event(
                e.id,
                EventUpdate {
                    name: Some("Tech Fest".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Tech Fest");
        assert_eq!(updated.fee, e.fee);
        assert_eq!(updated.date, e.date);
    }

    #[tokio::test]
    async fn delete_event_removes_it() {
        let store = Store::new();
        store.create_college(college("a@b.com")).await.unwrap();
        let e = store.create_event(event(1, "Fest")).await.unwrap();

        assert!(store.delete_event(e.id).await);
        assert!(store.get_event(e.id).await.is_none());
        assert!(!store.delete_event(e.id).await);
        assert!(store.list_events(&EventFilter::default()).await.is_empty());
    }

    #[tokio::test]
    async fn event_listing_filters() {
        let store = Store::new();
        store.create_college(college("a@b.com")).await.unwrap();
        store.create_college(college("b@b.com")).await.unwrap();

        let mut fest = event(1, "Fest");
        fest.category = Some("cultural".to_string());
        let fest = store.create_event(fest).await.unwrap();

        let mut old = event(2, "Reunion");
        old.date = Utc.with_ymd_and_hms(2000, 1, 1, 10, 0, 0).unwrap();
        let old = store.create_event(old).await.unwrap();

        let by_college = store
            .list_events(&EventFilter {
                college_id: Some(1),
                ..Default::default()
            })
            .await;
        assert_eq!(by_college.len(), 1);
        assert_eq!(by_college[0].id, fest.id);

        let by_category = store
            .list_events(&EventFilter {
                category: Some("cultural".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(by_category.len(), 1);

        let upcoming = store
            .list_events(&EventFilter {
                time: Some(TimeWindow::Upcoming),
                ..Default::default()
            })
            .await;
        assert_eq!(upcoming[0].id, fest.id);
        assert_eq!(upcoming.len(), 1);

        let past = store
            .list_events(&EventFilter {
                time: Some(TimeWindow::Past),
                ..Default::default()
            })
            .await;
        assert_eq!(past[0].id, old.id);
        assert_eq!(past.len(), 1);
    }

    #[tokio::test]
    async fn inactive_events_only_show_in_admin_listing() {
        let store = Store::new();
        store.create_college(college("a@b.com")).await.unwrap();
        let e = store.create_event(event(1, "Fest")).await.unwrap();
        store
            .update_event(
                e.id,
                EventUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(store.list_events(&EventFilter::default()).await.is_empty());
        assert_eq!(store.list_all_events().await.len(), 1);
    }

    #[tokio::test]
    async fn registrations_listed_per_event() {
        let store = Store::new();
        store.create_college(college("a@b.com")).await.unwrap();
        let e1 = store.create_event(event(1, "Fest")).await.unwrap();
        let e2 = store.create_event(event(1, "Hackathon")).await.unwrap();
        store.create_registration(registration(e1.id)).await.unwrap();
        store.create_registration(registration(e2.id)).await.unwrap();
        store.create_registration(registration(e1.id)).await.unwrap();

        let for_e1 = store.registrations_for_event(e1.id).await;
        assert_eq!(for_e1.len(), 2);
        assert!(for_e1.iter().all(|r| r.event_id == e1.id));
    }

    #[tokio::test]
    async fn registration_verification_toggles() {
        let store = Store::new();
        store.create_college(college("a@b.com")).await.unwrap();
        let e = store.create_event(event(1, "Fest")).await.unwrap();
        let r = store.create_registration(registration(e.id)).await.unwrap();

        let updated = store
            .update_registration(
                r.id,
                RegistrationUpdate {
                    is_verified: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_verified);
        assert_eq!(updated.full_name, r.full_name);
        assert!(store.get_registration(r.id).await.unwrap().is_verified);
    }

    #[tokio::test]
    async fn feed_posts_await_approval() {
        let store = Store::new();
        let post = store
            .create_feed_post(NewFeedPost {
                author: "Jane".to_string(),
                college: "Tech U".to_string(),
                content: "Fest next week!".to_string(),
                image_url: None,
            })
            .await;
        assert!(!post.is_approved);
        assert_eq!(post.likes, 0);
        assert!(store.list_approved_feed_posts().await.is_empty());

        store
            .update_feed_post(
                post.id,
                FeedPostUpdate {
                    is_approved: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(store.list_approved_feed_posts().await.len(), 1);
        assert_eq!(store.list_feed_posts().await.len(), 1);

        assert!(store.delete_feed_post(post.id).await);
        assert!(store.get_feed_post(post.id).await.is_none());
    }

    #[tokio::test]
    async fn seeding_the_default_admin_is_idempotent() {
        let store = Store::new();
        let admin = store.seed_default_admin().await;
        assert_eq!(admin.username, DEFAULT_ADMIN_USERNAME);
        assert_eq!(admin.password, DEFAULT_ADMIN_PASSWORD);
        assert_eq!(admin.role, "superadmin");

        store.seed_default_admin().await;
        assert_eq!(store.list_admins().await.len(), 1);
    }

    #[tokio::test]
    async fn admin_crud() {
        let store = Store::new();
        let admin = store.seed_default_admin().await;
        let updated = store
            .update_admin(
                admin.id,
                AdminUpdate {
                    role: Some("moderator".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, "moderator");
        assert_eq!(store.get_admin(admin.id).await.unwrap().role, "moderator");

        assert!(store.delete_admin(admin.id).await);
        assert!(store.admin_by_username(DEFAULT_ADMIN_USERNAME).await.is_none());
    }

    #[tokio::test]
    async fn user_crud() {
        let store = Store::new();
        let user = store
            .create_user(NewUser {
                username: "jane".to_string(),
                email: "jane@x.com".to_string(),
                role: "user".to_string(),
                college_id: None,
            })
            .await;
        assert_eq!(user.id, 1);

        let updated = store
            .update_user(
                user.id,
                UserUpdate {
                    college_id: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.college_id, Some(3));

        assert_eq!(store.list_users().await.len(), 1);
        assert!(store.delete_user(user.id).await);
        assert!(store.get_user(user.id).await.is_none());
        assert!(store.list_users().await.is_empty());
    }
}
