pub fn quiz_response_fixture() -> &'static str {
    return r#"
{
  "questions": [
    {
      "question": "Which planet is known as the Red Planet?",
      "answers": ["Venus", "Mars", "Jupiter", "Mercury"],
      "correctIndex": 1
    },
    {
      "question": "What is the largest moon of Saturn?",
      "answers": ["Europa", "Ganymede", "Titan", "Callisto"],
      "correctIndex": 2,
      "difficulty": "easy"
    }
  ]
}
"#
    .trim();
}

pub fn fenced_quiz_response_fixture() -> String {
    return format!(
        "Sure! Here are your questions.\n\n```json\n{}\n```\n\nGood luck!",
        quiz_response_fixture()
    );
}

pub fn empty_quiz_response_fixture() -> &'static str {
    return r#"{ "questions": [] }"#;
}
