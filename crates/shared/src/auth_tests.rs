//! Claims and auth payload tests.

#[cfg(test)]
mod tests {
    use super::super::{
        Claims,
        auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo},
        types::UserId,
    };
    use chrono::{Duration, Utc};
    use serde_json::json;

    #[test]
    fn claims_take_both_instants_from_caller() {
        let user = UserId::new();
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::minutes(30);
        let claims = Claims::new(user.clone(), "a@x.com", issued_at, expires_at);

        assert_eq!(claims.sub, user);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn claims_expiry_boundary_is_inclusive() {
        let claims = Claims {
            sub: UserId::from("u1"),
            email: "a@x.com".into(),
            iat: 100,
            exp: 200,
        };

        assert!(!claims.is_expired_at(199));
        assert!(claims.is_expired_at(200));
        assert!(claims.is_expired_at(201));
    }

    #[test]
    fn claims_serialize_subject_as_string() {
        let claims = Claims {
            sub: UserId::from("user-42"),
            email: "a@x.com".into(),
            iat: 1,
            exp: 2,
        };
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(
            value,
            json!({ "sub": "user-42", "email": "a@x.com", "iat": 1, "exp": 2 })
        );
    }

    #[test]
    fn register_request_deserializes() {
        let req: RegisterRequest =
            serde_json::from_value(json!({ "email": "a@x.com", "password": "password123" }))
                .unwrap();

        assert_eq!(req.email, "a@x.com");
        assert_eq!(req.password, "password123");
    }

    #[test]
    fn login_request_requires_password() {
        let result = serde_json::from_value::<LoginRequest>(json!({ "email": "a@x.com" }));
        assert!(result.is_err());
    }

    #[test]
    fn auth_response_never_carries_password() {
        let now = Utc::now();
        let response = AuthResponse {
            token: "t".into(),
            user: UserInfo {
                id: UserId::from("u1"),
                email: "a@x.com".into(),
                created_at: now,
                updated_at: now,
            },
        };
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["token"], "t");
        assert_eq!(value["user"]["id"], "u1");
        assert!(value["user"].get("password").is_none());
    }
}
